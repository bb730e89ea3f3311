//! Select configuration.

use crate::error::SelectError;
use crate::loader::{InitialOptions, LoadCompletion};
use crate::option::OptionData;
use crate::text_input::LabelPosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with a value that matches no option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnavailableValueHandling {
    /// Keep the value and show the unavailable marker.
    #[default]
    ErrorMessage,
    /// Keep the value silently.
    Allow,
}

/// Plain-data settings of a select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectSettings {
    /// Label shown with the text surface
    pub label: Option<String>,
    /// Label placement
    pub label_position: LabelPosition,
    /// Open the panel when the text surface gains focus
    pub open_on_input_focus: bool,
    /// Policy for values with no matching option
    pub unavailable_value_handling: UnavailableValueHandling,
    /// Let the text surface paint a dirtiness marker
    pub show_dirtiness_indicator: bool,
    /// Gap kept between the panel and the viewport edges
    pub viewport_margin: f32,
    /// Delay before the document click listener reacts
    pub click_listener_delay_ms: u64,
    /// Height of one option row
    pub row_height: f32,
    /// Minimum panel width
    pub min_width: f32,
}

impl Default for SelectSettings {
    fn default() -> Self {
        Self {
            label: None,
            label_position: LabelPosition::Top,
            open_on_input_focus: true,
            unavailable_value_handling: UnavailableValueHandling::ErrorMessage,
            show_dirtiness_indicator: false,
            viewport_margin: 5.0,
            click_listener_delay_ms: 100,
            row_height: 32.0,
            min_width: 0.0,
        }
    }
}

impl SelectSettings {
    /// Parse settings from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidSettings`] if the JSON is malformed or a
    /// key has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, SelectError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Callback receiving the new value after a user pick.
pub type ValueChangeHandler<V> = Box<dyn FnMut(&V)>;

/// Callback receiving a failed load.
pub type LoadErrorHandler = Box<dyn FnMut(&SelectError)>;

/// Callbacks the select fires.
pub struct SelectEvents<V> {
    /// Called after the user picks an option
    pub on_value_change: Option<ValueChangeHandler<V>>,
    /// Called when the deferred loader fails
    pub on_load_error: Option<LoadErrorHandler>,
}

impl<V> Default for SelectEvents<V> {
    fn default() -> Self {
        Self {
            on_value_change: None,
            on_load_error: None,
        }
    }
}

impl<V> fmt::Debug for SelectEvents<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectEvents")
            .field("on_value_change", &self.on_value_change.is_some())
            .field("on_load_error", &self.on_load_error.is_some())
            .finish()
    }
}

/// Everything needed to build a [`Select`](crate::Select).
pub struct SelectConfig<V> {
    /// Plain-data settings
    pub settings: SelectSettings,
    /// Initial options or their loader
    pub initial_options: InitialOptions<V>,
    /// Value to start from
    pub initial_value: Option<V>,
    /// Callbacks
    pub events: SelectEvents<V>,
}

impl<V> Default for SelectConfig<V> {
    fn default() -> Self {
        Self {
            settings: SelectSettings::default(),
            initial_options: InitialOptions::default(),
            initial_value: None,
            events: SelectEvents::default(),
        }
    }
}

impl<V> SelectConfig<V> {
    /// Create a config with default settings and no options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the settings.
    #[must_use]
    pub fn settings(mut self, settings: SelectSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.settings.label = Some(label.into());
        self
    }

    /// Set the label position.
    #[must_use]
    pub fn label_position(mut self, position: LabelPosition) -> Self {
        self.settings.label_position = position;
        self
    }

    /// Set whether focusing the text surface opens the panel.
    #[must_use]
    pub fn open_on_input_focus(mut self, open: bool) -> Self {
        self.settings.open_on_input_focus = open;
        self
    }

    /// Set the unavailable value policy.
    #[must_use]
    pub fn unavailable_value_handling(mut self, handling: UnavailableValueHandling) -> Self {
        self.settings.unavailable_value_handling = handling;
        self
    }

    /// Set whether the dirtiness marker is painted.
    #[must_use]
    pub fn show_dirtiness_indicator(mut self, show: bool) -> Self {
        self.settings.show_dirtiness_indicator = show;
        self
    }

    /// Supply the options up front.
    #[must_use]
    pub fn options(mut self, options: Vec<OptionData<V>>) -> Self {
        self.initial_options = InitialOptions::Immediate(options);
        self
    }

    /// Load the options later.
    #[must_use]
    pub fn loader(mut self, loader: impl FnOnce(LoadCompletion<V>) + 'static) -> Self {
        self.initial_options = InitialOptions::deferred(loader);
        self
    }

    /// Set the initial value.
    #[must_use]
    pub fn initial_value(mut self, value: V) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Set the value change callback.
    #[must_use]
    pub fn on_value_change(mut self, handler: impl FnMut(&V) + 'static) -> Self {
        self.events.on_value_change = Some(Box::new(handler));
        self
    }

    /// Set the load error callback.
    #[must_use]
    pub fn on_load_error(mut self, handler: impl FnMut(&SelectError) + 'static) -> Self {
        self.events.on_load_error = Some(Box::new(handler));
        self
    }
}

impl<V: fmt::Debug> fmt::Debug for SelectConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectConfig")
            .field("settings", &self.settings)
            .field("initial_options", &self.initial_options)
            .field("initial_value", &self.initial_value)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // SelectSettings Tests
    // =========================================================================

    #[test]
    fn test_settings_default() {
        let settings = SelectSettings::default();
        assert!(settings.open_on_input_focus);
        assert_eq!(
            settings.unavailable_value_handling,
            UnavailableValueHandling::ErrorMessage
        );
        assert_eq!(settings.viewport_margin, 5.0);
        assert_eq!(settings.click_listener_delay_ms, 100);
        assert!(!settings.show_dirtiness_indicator);
    }

    #[test]
    fn test_settings_from_json_partial() {
        let settings = SelectSettings::from_json(
            r#"{"label":"Country","labelPosition":"left","unavailableValueHandling":"ALLOW"}"#,
        )
        .expect("parse");
        assert_eq!(settings.label.as_deref(), Some("Country"));
        assert_eq!(settings.label_position, LabelPosition::Left);
        assert_eq!(
            settings.unavailable_value_handling,
            UnavailableValueHandling::Allow
        );
        assert!(settings.open_on_input_focus);
    }

    #[test]
    fn test_settings_from_json_invalid() {
        let err = SelectSettings::from_json(r#"{"openOnInputFocus":"yes"}"#).unwrap_err();
        assert!(matches!(err, SelectError::InvalidSettings(_)));
    }

    #[test]
    fn test_unavailable_value_handling_serde() {
        let json = serde_json::to_string(&UnavailableValueHandling::ErrorMessage).expect("serialize");
        assert_eq!(json, "\"ERROR_MESSAGE\"");
    }

    // =========================================================================
    // SelectConfig Tests
    // =========================================================================

    #[test]
    fn test_config_builder() {
        let config = SelectConfig::new()
            .label("Country")
            .label_position(LabelPosition::Left)
            .open_on_input_focus(false)
            .unavailable_value_handling(UnavailableValueHandling::Allow)
            .show_dirtiness_indicator(true)
            .options(vec![OptionData::new("1", "America", "america")])
            .initial_value("america")
            .on_value_change(|_| {});

        assert_eq!(config.settings.label.as_deref(), Some("Country"));
        assert!(!config.settings.open_on_input_focus);
        assert!(config.settings.show_dirtiness_indicator);
        assert_eq!(config.initial_value, Some("america"));
        assert!(config.events.on_value_change.is_some());
        assert!(config.events.on_load_error.is_none());
        assert!(matches!(config.initial_options, InitialOptions::Immediate(ref l) if l.len() == 1));
    }

    #[test]
    fn test_config_loader() {
        let config: SelectConfig<u32> = SelectConfig::new().loader(|c| c.fail("offline"));
        assert!(matches!(config.initial_options, InitialOptions::Deferred(_)));
        assert!(format!("{config:?}").contains("Deferred(..)"));
    }
}
