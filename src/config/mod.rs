//! Configuration management
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock `theme` cookie / `dark` class behaviour.

use serde::Deserialize;

use crate::error::Result;

/// Element id of the optional `<script type="application/json">` block that
/// carries page configuration.
pub const CONFIG_ELEMENT_ID: &str = "darkmode-config";

pub const DEFAULT_SWITCH_CLASS: &str = "dark-mode-toggle";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,

    #[serde(default = "default_dark_class")]
    pub dark_class: String,

    /// Marker class identifying toggle-switch controls.
    #[serde(default = "default_switch_class")]
    pub switch_class: String,

    #[serde(default)]
    pub target: ThemeTarget,

    #[serde(default)]
    pub switch_sync: SwitchSync,
}

fn default_cookie_name() -> String {
    "theme".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn default_dark_class() -> String {
    "dark".to_string()
}

fn default_switch_class() -> String {
    DEFAULT_SWITCH_CLASS.to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
            dark_class: default_dark_class(),
            switch_class: default_switch_class(),
            target: ThemeTarget::default(),
            switch_sync: SwitchSync::default(),
        }
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// CSS selector matching every toggle-switch control.
    pub fn switch_selector(&self) -> String {
        format!(".{}", self.switch_class)
    }
}

/// Element whose class list carries the dark class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeTarget {
    /// `<html>`
    #[default]
    Root,
    /// `<body>`
    Body,
}

/// When bootstrap marks toggle-switch controls as checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchSync {
    /// After DOM-ready, whatever theme was resolved.
    #[default]
    Always,
    /// Only when bootstrap resolved to dark.
    WhenDark,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ThemeConfig::from_json("{}").expect("config should load");
        assert_eq!(config, ThemeConfig::default());
        assert_eq!(config.cookie_name, "theme");
        assert_eq!(config.cookie_path, "/");
        assert_eq!(config.target, ThemeTarget::Root);
        assert_eq!(config.switch_sync, SwitchSync::Always);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ThemeConfig::from_json(
            r#"{"cookie_name":"site-theme","target":"body","switch_sync":"when_dark"}"#,
        )
        .expect("config should load");

        assert_eq!(config.cookie_name, "site-theme");
        assert_eq!(config.target, ThemeTarget::Body);
        assert_eq!(config.switch_sync, SwitchSync::WhenDark);
        // Untouched fields keep defaults
        assert_eq!(config.dark_class, "dark");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ThemeConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::error::ThemeError::Config(_)));
    }

    #[test]
    fn switch_selector_is_a_class_selector() {
        assert_eq!(ThemeConfig::default().switch_selector(), ".dark-mode-toggle");
    }
}
