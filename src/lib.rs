//! darkmode - cookie-persisted light/dark theme for web pages
//!
//! This library provides:
//! - A theme preference model backed by a `theme` cookie
//! - A controller that toggles the page's `dark` class and persists the choice
//! - A once-per-page bootstrap that applies the stored or system preference
//! - Browser backends (wasm32) and in-memory backends for other hosts
//! - A Dioxus theme context and toggle switch component

pub mod app;
pub mod config;
pub mod controller;
pub mod cookie;
pub mod document;
pub mod error;
pub mod memory;
pub mod preference;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{SwitchSync, ThemeConfig, ThemeTarget};
pub use controller::{BootstrapPlan, LifecycleSignal, ThemePreferenceController, TOGGLE_TTL_DAYS};
pub use error::{CookieError, ThemeError};
pub use preference::{StoredTheme, ThemeMode, ThemePreference};

/// Crate version, overridable at build time via `DARKMODE_VERSION`.
pub const VERSION: &str = env!("DARKMODE_VERSION");

pub const GIT_SHA: &str = env!("DARKMODE_GIT_SHA");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_stamps_version_and_sha() {
        assert!(!VERSION.is_empty());
        assert!(!GIT_SHA.is_empty());
    }
}
