//! Theme preference model.
//!
//! `ThemePreference` is what the cookie says, `StoredTheme` is what may be
//! written to it, and `ThemeMode` is what the page currently shows.

use serde::{Deserialize, Serialize};

/// A value that can be persisted in the theme cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredTheme {
    Light,
    Dark,
}

impl StoredTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoredTheme::Light => "light",
            StoredTheme::Dark => "dark",
        }
    }

    /// Strict parse: only the exact tokens `light` and `dark` are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(StoredTheme::Light),
            "dark" => Some(StoredTheme::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoredTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted preference, including the "never chosen" case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Unset,
}

impl ThemePreference {
    /// Interpret a raw cookie value. Missing or foreign values read as `Unset`.
    pub fn from_cookie_value(value: Option<&str>) -> Self {
        match value.and_then(StoredTheme::parse) {
            Some(stored) => stored.into(),
            None => ThemePreference::Unset,
        }
    }

    pub fn stored(&self) -> Option<StoredTheme> {
        match self {
            ThemePreference::Light => Some(StoredTheme::Light),
            ThemePreference::Dark => Some(StoredTheme::Dark),
            ThemePreference::Unset => None,
        }
    }

    /// Whether bootstrap should apply dark mode given the system preference.
    pub fn resolves_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemePreference::Dark => true,
            ThemePreference::Light => false,
            ThemePreference::Unset => system_prefers_dark,
        }
    }
}

impl From<StoredTheme> for ThemePreference {
    fn from(stored: StoredTheme) -> Self {
        match stored {
            StoredTheme::Light => ThemePreference::Light,
            StoredTheme::Dark => ThemePreference::Dark,
        }
    }
}

/// Visual state of the target element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }

    /// The preference value a toggle into this mode persists.
    pub fn stored(&self) -> StoredTheme {
        match self {
            ThemeMode::Light => StoredTheme::Light,
            ThemeMode::Dark => StoredTheme::Dark,
        }
    }
}

impl From<bool> for ThemeMode {
    fn from(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_values_map_to_preferences() {
        assert_eq!(
            ThemePreference::from_cookie_value(Some("dark")),
            ThemePreference::Dark
        );
        assert_eq!(
            ThemePreference::from_cookie_value(Some("light")),
            ThemePreference::Light
        );
        assert_eq!(
            ThemePreference::from_cookie_value(None),
            ThemePreference::Unset
        );
    }

    #[test]
    fn foreign_cookie_values_read_as_unset() {
        for raw in ["", "Dark", "blue", " dark"] {
            assert_eq!(
                ThemePreference::from_cookie_value(Some(raw)),
                ThemePreference::Unset,
                "{:?} should not be accepted",
                raw
            );
        }
    }

    #[test]
    fn explicit_preference_overrides_system() {
        assert!(ThemePreference::Dark.resolves_dark(false));
        assert!(!ThemePreference::Light.resolves_dark(true));
        assert!(ThemePreference::Unset.resolves_dark(true));
        assert!(!ThemePreference::Unset.resolves_dark(false));
    }

    #[test]
    fn serde_uses_lowercase_tokens() {
        let json = serde_json::to_string(&ThemePreference::Unset).unwrap();
        assert_eq!(json, "\"unset\"");
        let parsed: StoredTheme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(parsed, StoredTheme::Dark);
    }
}
