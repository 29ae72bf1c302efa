//! Target configuration types and endpoint resolution.
//!
//! A target pairs a URL template with the table of interfaces the
//! data-binding layer may call on it. The template keeps the `[iface]`
//! and `[fromName]` placeholders; they are filled in per request (see
//! [`crate::request`]).

use crate::{
    error::{Result, TargetError},
    selection::{extract_selected_source_name, InputDescriptor},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use swac_core::{
    EmptySelectionPolicy, HttpMethod, Operation, ResolverConfig, ResourceKind, SourceName,
};
use tracing::debug;

/// Placeholder replaced by the resource kind of an interface.
pub const IFACE_PLACEHOLDER: &str = "[iface]";

/// Placeholder replaced by the collection name.
pub const FROM_NAME_PLACEHOLDER: &str = "[fromName]";

/// HTTP method and resource kind for one operation.
///
/// Serializes as a two-element array, e.g. `["PUT", "records"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interface(pub HttpMethod, pub ResourceKind);

impl Interface {
    /// HTTP method of the interface.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.0
    }

    /// Resource kind of the interface.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.1
    }
}

/// Resolved URL template and interface table for one data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfiguration {
    /// URL template containing `[iface]` and `[fromName]`
    pub url: String,

    /// Interface per operation
    pub interfaces: BTreeMap<Operation, Interface>,
}

impl TargetConfiguration {
    /// Get the interface for an operation, if the target defines one.
    #[must_use]
    pub fn interface(&self, operation: Operation) -> Option<Interface> {
        self.interfaces.get(&operation).copied()
    }

    /// Render the target in the JSON shape the data-binding layer consumes.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// The interface table every SmartData target exposes.
#[must_use]
pub fn smartdata_interfaces() -> BTreeMap<Operation, Interface> {
    use HttpMethod::{Delete, Get, Post, Put};
    use ResourceKind::{Collection, Records};

    Operation::ALL
        .into_iter()
        .map(|operation| {
            let interface = match operation {
                Operation::Get | Operation::List => Interface(Get, Records),
                Operation::Defs => Interface(Get, Collection),
                Operation::Cdefs => Interface(Post, Collection),
                Operation::Create => Interface(Post, Records),
                Operation::Update => Interface(Put, Records),
                Operation::Delete => Interface(Delete, Records),
            };
            (operation, interface)
        })
        .collect()
}

/// Resolve the target for a source name with the default settings.
///
/// The name is embedded without validation; an empty name yields a URL
/// starting with `//smartdata/`.
#[must_use]
pub fn resolve_target(selected_source_name: &str) -> TargetConfiguration {
    build_target(&ResolverConfig::default(), selected_source_name)
}

fn build_target(config: &ResolverConfig, source: &str) -> TargetConfiguration {
    let url = format!(
        "/{source}/{}/{IFACE_PLACEHOLDER}/{FROM_NAME_PLACEHOLDER}?storage={}",
        config.service_path, config.storage
    );

    debug!(source = %source, url = %url, "resolved target");

    TargetConfiguration {
        url,
        interfaces: smartdata_interfaces(),
    }
}

/// Endpoint resolver carrying explicit resolution settings.
#[derive(Debug, Clone, Default)]
pub struct TargetResolver {
    config: ResolverConfig,
}

impl TargetResolver {
    /// Create a resolver with the given settings.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Settings this resolver was created with.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the target for a raw source name.
    ///
    /// # Errors
    /// Returns [`TargetError::MissingSelection`] for an empty name when the
    /// empty-selection policy is `Reject`. Never fails under `Preserve`.
    pub fn resolve(&self, source: &str) -> Result<TargetConfiguration> {
        if source.is_empty() && self.config.empty_selection == EmptySelectionPolicy::Reject {
            return Err(TargetError::MissingSelection);
        }
        Ok(build_target(&self.config, source))
    }

    /// Resolve the target for an already validated source name.
    #[must_use]
    pub fn resolve_source(&self, source: &SourceName) -> TargetConfiguration {
        build_target(&self.config, source.as_str())
    }

    /// Validate a raw source name before resolving it.
    ///
    /// # Errors
    /// Returns [`TargetError::InvalidSource`] if the name is empty, a dot
    /// segment, or not a single path segment.
    pub fn resolve_strict(&self, source: &str) -> Result<TargetConfiguration> {
        let source = SourceName::new(source)?;
        Ok(self.resolve_source(&source))
    }

    /// Extract the selected source from the inputs and resolve it.
    ///
    /// No inputs is treated like an empty name.
    pub fn resolve_selection(&self, inputs: &[InputDescriptor]) -> Result<TargetConfiguration> {
        let source = extract_selected_source_name(inputs).unwrap_or_default();
        self.resolve(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_url() {
        let target = resolve_target("smartmonitoring");
        assert_eq!(
            target.url,
            "/smartmonitoring/smartdata/[iface]/[fromName]?storage=smartmonitoring"
        );

        let target = resolve_target("other");
        assert_eq!(
            target.url,
            "/other/smartdata/[iface]/[fromName]?storage=smartmonitoring"
        );
    }

    #[test]
    fn test_interface_table_is_fixed() {
        let target = resolve_target("anything");
        assert_eq!(target.interfaces.len(), 7);

        let expected = [
            (Operation::Get, HttpMethod::Get, ResourceKind::Records),
            (Operation::List, HttpMethod::Get, ResourceKind::Records),
            (Operation::Defs, HttpMethod::Get, ResourceKind::Collection),
            (Operation::Cdefs, HttpMethod::Post, ResourceKind::Collection),
            (Operation::Create, HttpMethod::Post, ResourceKind::Records),
            (Operation::Update, HttpMethod::Put, ResourceKind::Records),
            (Operation::Delete, HttpMethod::Delete, ResourceKind::Records),
        ];
        for (operation, method, kind) in expected {
            assert_eq!(
                target.interface(operation),
                Some(Interface(method, kind)),
                "interface for {operation}"
            );
        }

        assert_eq!(target.interfaces, resolve_target("other").interfaces);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        assert_eq!(resolve_target("smartmonitoring"), resolve_target("smartmonitoring"));
    }

    #[test]
    fn test_empty_name_is_preserved() {
        let target = resolve_target("");
        assert_eq!(target.url, "//smartdata/[iface]/[fromName]?storage=smartmonitoring");
        assert_eq!(target.interfaces.len(), 7);
    }

    #[test]
    fn test_json_shape() {
        let json = resolve_target("smartmonitoring").to_json().expect("serialize target");
        assert_eq!(
            json,
            serde_json::json!({
                "url": "/smartmonitoring/smartdata/[iface]/[fromName]?storage=smartmonitoring",
                "interfaces": {
                    "get": ["GET", "records"],
                    "list": ["GET", "records"],
                    "defs": ["GET", "collection"],
                    "cdefs": ["POST", "collection"],
                    "create": ["POST", "records"],
                    "update": ["PUT", "records"],
                    "delete": ["DELETE", "records"]
                }
            })
        );
    }

    #[test]
    fn test_resolver_uses_config() {
        let resolver = TargetResolver::new(ResolverConfig {
            service_path: "api".to_string(),
            storage: "public".to_string(),
            ..ResolverConfig::default()
        });

        let target = resolver.resolve("smartdata").expect("resolve target");
        assert_eq!(target.url, "/smartdata/api/[iface]/[fromName]?storage=public");
    }

    #[test]
    fn test_default_resolver_matches_free_function() {
        let resolver = TargetResolver::default();
        assert_eq!(
            resolver.resolve("smartmonitoring").expect("resolve target"),
            resolve_target("smartmonitoring")
        );
        assert_eq!(
            resolver.resolve("").expect("empty selection is preserved"),
            resolve_target("")
        );
    }

    #[test]
    fn test_reject_policy() {
        let resolver = TargetResolver::new(ResolverConfig {
            empty_selection: EmptySelectionPolicy::Reject,
            ..ResolverConfig::default()
        });

        assert!(matches!(
            resolver.resolve(""),
            Err(TargetError::MissingSelection)
        ));
        assert!(matches!(
            resolver.resolve_selection(&[]),
            Err(TargetError::MissingSelection)
        ));
        assert!(resolver.resolve("smartmonitoring").is_ok());
    }

    #[test]
    fn test_resolve_selection_last_wins() {
        let resolver = TargetResolver::default();
        let inputs = vec![
            InputDescriptor::new("first"),
            InputDescriptor::new("smartmonitoring"),
        ];

        let target = resolver.resolve_selection(&inputs).expect("resolve selection");
        assert_eq!(target, resolve_target("smartmonitoring"));

        let target = resolver.resolve_selection(&[]).expect("no inputs is preserved");
        assert!(target.url.starts_with("//smartdata/"));
    }

    #[test]
    fn test_resolve_source() {
        let resolver = TargetResolver::default();
        let source = SourceName::new("smartmonitoring").expect("valid source name");
        assert_eq!(resolver.resolve_source(&source), resolve_target("smartmonitoring"));
    }

    #[test]
    fn test_resolve_strict() {
        let resolver = TargetResolver::default();
        assert_eq!(
            resolver.resolve_strict("smartmonitoring").expect("valid source"),
            resolve_target("smartmonitoring")
        );
        assert!(matches!(
            resolver.resolve_strict(""),
            Err(TargetError::InvalidSource(_))
        ));
        assert!(matches!(
            resolver.resolve_strict("../admin"),
            Err(TargetError::InvalidSource(_))
        ));
        assert!(matches!(
            resolver.resolve_strict(".."),
            Err(TargetError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_deserialize_target() {
        let json = r#"{"url": "/x/smartdata/[iface]/[fromName]", "interfaces": {"get": ["GET", "records"]}}"#;
        let target: TargetConfiguration = serde_json::from_str(json).expect("parse target");
        assert_eq!(
            target.interface(Operation::Get),
            Some(Interface(HttpMethod::Get, ResourceKind::Records))
        );
        assert_eq!(target.interface(Operation::Delete), None);

        let bad = r#"{"url": "/x", "interfaces": {"get": ["PATCH", "records"]}}"#;
        assert!(serde_json::from_str::<TargetConfiguration>(bad).is_err());
    }
}
