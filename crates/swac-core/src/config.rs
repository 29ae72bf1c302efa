//! Configuration management for the SWAC admin frontend.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Defaults mirror the values the
//! frontend ships with.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main frontend configuration.
///
/// This is loaded from `~/.config/swac/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Core script and style paths loaded before any component
    pub core_components: CoreComponents,
    /// Progressive web app settings
    pub progressive: ProgressiveConfig,
    /// Backend connection settings
    pub datasources: DataSourcesConfig,
    /// Notification and debugging behavior
    pub ui: UiConfig,
    /// Target resolution settings for the admin presets widget
    pub resolver: ResolverConfig,
    /// Footer navigation links
    pub footer_links: Vec<FooterLink>,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            core_components: CoreComponents::default(),
            progressive: ProgressiveConfig::default(),
            datasources: DataSourcesConfig::default(),
            ui: UiConfig::default(),
            resolver: ResolverConfig::default(),
            footer_links: FooterLink::defaults(),
        }
    }
}

impl FrontendConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML or fail validation
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`FrontendConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SWAC_LANG`: Override the notification language
    /// - `SWAC_DEBUGMODE`: Override debug output (true/false)
    /// - `SWAC_REMOTE_TIMEOUT_MS`: Override the backend connection timeout
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `SWAC_*` environment overrides in place.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(lang) = std::env::var("SWAC_LANG") {
            tracing::debug!("Override ui.lang from env: {}", lang);
            self.ui.lang = lang;
        }

        if let Ok(val) = std::env::var("SWAC_DEBUGMODE") {
            if let Ok(debugmode) = val.parse() {
                self.ui.debugmode = debugmode;
                tracing::debug!("Override ui.debugmode from env: {}", debugmode);
            }
        }

        if let Ok(val) = std::env::var("SWAC_REMOTE_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.datasources.remote_timeout_ms = timeout;
                tracing::debug!("Override datasources.remote_timeout_ms from env: {}", timeout);
            }
        }
    }

    /// Check values the rest of the frontend relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ui.lang.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ui.lang".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        if self.datasources.remote_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "datasources.remote_timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.resolver.storage.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "resolver.storage".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        if self.resolver.target_widget.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "resolver.target_widget".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/swac/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("de", "smartmonitoring", "swac").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Progressive web app settings.
///
/// Carried for the framework runtime; nothing in this workspace caches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressiveConfig {
    /// Whether the service worker is registered
    pub active: bool,
    /// Days after which cached pages are reloaded or evicted
    pub cachetimeout_days: u32,
    /// Files available offline after the first visit
    pub precache: Vec<String>,
    /// Components precached together with the files
    pub components: Vec<String>,
}

impl Default for ProgressiveConfig {
    fn default() -> Self {
        Self {
            active: false,
            cachetimeout_days: 30,
            precache: [
                "/css/global.css",
                "/sites/index.html",
                "/css/index.css",
                "/content/logo.png",
                "/manifest.json",
                "/configuration.js",
                "/data/routes.js",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            components: vec!["Navigation".to_string()],
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourcesConfig {
    /// URL templates tried in order; `[fromName]` is the collection name
    pub urls: Vec<String>,
    /// Whether the connector probes the API before the first request
    pub apicheckup: bool,
    /// Connection timeout in milliseconds
    pub remote_timeout_ms: u64,
    /// Interface names appended by the generic connector, keyed by verb
    pub interfaces: BTreeMap<String, String>,
}

impl Default for DataSourcesConfig {
    fn default() -> Self {
        let interfaces = ["get", "list", "update", "delete", "definition"]
            .into_iter()
            .map(|name| (name.to_string(), name.to_string()))
            .collect();

        Self {
            urls: vec!["/smartdata/[fromName]".to_string()],
            apicheckup: false,
            remote_timeout_ms: 50_000,
            interfaces,
        }
    }
}

/// Notification and debugging behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Language of framework notifications
    pub lang: String,
    /// How long notifications stay visible, in milliseconds
    pub notify_duration_ms: u64,
    /// Emit NOTICE and WARNING output
    pub debugmode: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            lang: "de".to_string(),
            notify_duration_ms: 5000,
            debugmode: false,
        }
    }
}

/// What to do when a selection change yields no source name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Embed the empty segment, producing `//smartdata/...`
    #[default]
    Preserve,
    /// Fail with a missing-selection error
    Reject,
}

/// Target resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Path segment of the SmartData service below the source name
    pub service_path: String,
    /// Value of the `storage` query parameter
    pub storage: String,
    /// Handling of an empty selection
    pub empty_selection: EmptySelectionPolicy,
    /// Id of the widget that receives the resolved target
    pub target_widget: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            service_path: "smartdata".to_string(),
            storage: "smartmonitoring".to_string(),
            empty_selection: EmptySelectionPolicy::Preserve,
            target_widget: "adm_presets".to_string(),
        }
    }
}

/// Script and style paths the framework loads on startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoreComponents(pub Vec<String>);

impl Default for CoreComponents {
    fn default() -> Self {
        Self(
            [
                "/swac/Msg.js",
                "/swac/swac.css",
                "/swac/libs/luxon.min.js",
                "/swac/libs/moment-with-locales.min.js",
                "/swac/connectors/remote.js",
                "/swac/algorithms/DatatypeReflection.js",
                "/swac/View.js",
                "/swac/Binding.js",
                "/swac/WatchableSet.js",
                "/swac/BindPoint.js",
                "/swac/model.js",
                "/swac/storage.js",
                "/swac/Component.js",
                "/swac/ComponentHandler.js",
                "/swac/ComponentPlugin.js",
                "/swac/ComponentPluginHandler.js",
                "/swac/OnlineReactions.js",
                "/swac/OnlineReaction.js",
                "/swac/language.js",
                "/swac/langs/de.js",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

/// One footer navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    /// Link id
    pub id: u32,
    /// Route pattern the link is shown on (`*` for every page)
    pub rfrom: String,
    /// Link destination
    pub rto: String,
    /// Link text
    pub name: String,
}

impl FooterLink {
    /// Footer links shipped with the frontend.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::everywhere(1, "datenschutz.html", "Datenschutzerklärung"),
            Self::everywhere(2, "impressum.html", "Impressum"),
            Self::everywhere(3, "haftung.html", "Haftungsausschluss"),
            Self::everywhere(4, "ueber.html", "Über SmartMonitoring"),
        ]
    }

    fn everywhere(id: u32, rto: &str, name: &str) -> Self {
        Self {
            id,
            rfrom: "*".to_string(),
            rto: rto.to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FrontendConfig::default();
        assert!(!config.progressive.active);
        assert_eq!(config.progressive.cachetimeout_days, 30);
        assert_eq!(config.progressive.components, vec!["Navigation"]);
        assert_eq!(config.datasources.urls, vec!["/smartdata/[fromName]"]);
        assert_eq!(config.datasources.remote_timeout_ms, 50_000);
        assert!(!config.datasources.apicheckup);
        assert_eq!(
            config.datasources.interfaces.get("definition").map(String::as_str),
            Some("definition")
        );
        assert!(!config.datasources.interfaces.contains_key("create"));
        assert_eq!(config.ui.lang, "de");
        assert_eq!(config.ui.notify_duration_ms, 5000);
        assert!(!config.ui.debugmode);
        assert_eq!(config.resolver.storage, "smartmonitoring");
        assert_eq!(config.resolver.target_widget, "adm_presets");
        assert_eq!(
            config.resolver.empty_selection,
            EmptySelectionPolicy::Preserve
        );
        assert_eq!(config.core_components.0.len(), 20);
        assert_eq!(config.footer_links.len(), 4);
        assert!(config.footer_links.iter().all(|link| link.rfrom == "*"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = FrontendConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[progressive]"));
        assert!(toml_str.contains("[resolver]"));
        assert!(toml_str.contains("[[footer_links]]"));

        let parsed: FrontendConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("swac").join("config.toml");

        let mut config = FrontendConfig::default();
        config.ui.lang = "en".to_string();
        config.resolver.empty_selection = EmptySelectionPolicy::Reject;

        config.save_to(&config_path).expect("save config");
        let loaded = FrontendConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.ui.lang, "en");
        assert_eq!(loaded.resolver.empty_selection, EmptySelectionPolicy::Reject);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = FrontendConfig::load_from(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            "[datasources]\nremote_timeout_ms = 0\n",
        )
        .expect("write config file");

        let result = FrontendConfig::load_from(&config_path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "datasources.remote_timeout_ms"
        ));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SWAC_LANG", "en");
        std::env::set_var("SWAC_DEBUGMODE", "true");
        std::env::set_var("SWAC_REMOTE_TIMEOUT_MS", "not-a-number");

        let mut config = FrontendConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.ui.lang, "en");
        assert!(config.ui.debugmode);
        // Unparseable values leave the default in place
        assert_eq!(config.datasources.remote_timeout_ms, 50_000);

        std::env::remove_var("SWAC_LANG");
        std::env::remove_var("SWAC_DEBUGMODE");
        std::env::remove_var("SWAC_REMOTE_TIMEOUT_MS");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
core_components = ["/swac/Msg.js"]

[ui]
lang = "en"

[resolver]
storage = "public"
empty_selection = "reject"
"#;

        let config: FrontendConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.ui.lang, "en");
        assert_eq!(config.resolver.storage, "public");
        assert_eq!(config.resolver.empty_selection, EmptySelectionPolicy::Reject);
        assert_eq!(config.core_components.0, vec!["/swac/Msg.js"]);
        // These should be defaults
        assert_eq!(config.ui.notify_duration_ms, 5000);
        assert_eq!(config.resolver.service_path, "smartdata");
        assert_eq!(config.footer_links.len(), 4);
    }
}
