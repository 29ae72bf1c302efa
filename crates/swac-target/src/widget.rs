//! Adapter between widget selection events and target resolution.
//!
//! The widget runtime stays behind three small traits; this module only
//! sequences the event: extract the selection, resolve the target, hand it
//! to the presets widget options and ask the presets widget to reload.

use crate::{
    error::{Result, TargetError},
    selection::InputDescriptor,
    target::{TargetConfiguration, TargetResolver},
};
use serde::{Deserialize, Serialize};
use swac_core::{FrontendConfig, ResolverConfig};
use tracing::{debug, info};

/// A widget whose input elements can be enumerated.
pub trait InputSource {
    /// Current input elements of the widget.
    fn inputs(&self) -> Vec<InputDescriptor>;
}

/// A widget that can be asked to reload its data.
pub trait Reloadable {
    /// Request a reload. Completion is not observed.
    fn reload(&mut self);
}

/// Lookup of widgets by id.
pub trait WidgetDirectory {
    /// Find the widget registered under `id`.
    fn lookup(&mut self, id: &str) -> Option<&mut dyn Reloadable>;
}

/// Options object of a widget as seen by the data-binding layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Render the widget even if it has no data
    pub show_when_no_data: bool,
    /// Target the widget loads its data from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_source: Option<TargetConfiguration>,
}

impl WidgetOptions {
    /// Options for a widget that renders without data.
    #[must_use]
    pub fn shown_when_empty() -> Self {
        Self {
            show_when_no_data: true,
            target_source: None,
        }
    }
}

/// Handles selection changes of the source chooser widget.
///
/// Owns the options of the presets widget, so the resolved target lives
/// here until the next change event replaces it.
#[derive(Debug, Clone)]
pub struct SelectionChangeHandler {
    resolver: TargetResolver,
    target_widget: String,
    select_options: WidgetOptions,
    presets_options: WidgetOptions,
}

impl SelectionChangeHandler {
    /// Create a handler from resolver settings.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        let target_widget = config.target_widget.clone();
        Self {
            resolver: TargetResolver::new(config),
            target_widget,
            select_options: WidgetOptions::shown_when_empty(),
            presets_options: WidgetOptions::shown_when_empty(),
        }
    }

    /// Create a handler from the resolver section of the frontend configuration.
    #[must_use]
    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::new(config.resolver.clone())
    }

    /// Id of the widget that receives the resolved target.
    #[must_use]
    pub fn target_widget(&self) -> &str {
        &self.target_widget
    }

    /// Options of the source chooser widget.
    #[must_use]
    pub fn select_options(&self) -> &WidgetOptions {
        &self.select_options
    }

    /// Options of the presets widget, including the current target.
    #[must_use]
    pub fn presets_options(&self) -> &WidgetOptions {
        &self.presets_options
    }

    /// React to a selection change on `source`.
    ///
    /// The new target is assigned before the presets widget is looked up,
    /// and the widget is reloaded exactly once.
    ///
    /// # Errors
    /// Returns [`TargetError::MissingSelection`] when the resolver rejects an
    /// empty selection (nothing is assigned or reloaded), and
    /// [`TargetError::WidgetNotFound`] when the presets widget is missing
    /// (the target stays assigned).
    pub fn on_change(
        &mut self,
        source: &dyn InputSource,
        directory: &mut dyn WidgetDirectory,
    ) -> Result<&TargetConfiguration> {
        let inputs = source.inputs();
        debug!(inputs = inputs.len(), "selection changed");

        let target = self.resolver.resolve_selection(&inputs)?;
        let target = self.presets_options.target_source.insert(target);

        let widget = directory
            .lookup(&self.target_widget)
            .ok_or_else(|| TargetError::WidgetNotFound {
                id: self.target_widget.clone(),
            })?;
        widget.reload();

        info!(widget = %self.target_widget, url = %target.url, "reloaded widget with new target");

        Ok(target)
    }
}

impl Default for SelectionChangeHandler {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}
