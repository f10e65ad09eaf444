//! Dioxus application entry point.
//!
//! A single page demonstrating the theme switch: the root installs the theme
//! context, the page reads it.

use dioxus::prelude::*;

pub mod components;
pub mod theme;

use components::DarkModeToggle;
use theme::{use_theme, use_theme_provider};

/// Root app component
#[component]
pub fn App() -> Element {
    // Initialize theme context at app root (handles cookie + DOM class)
    use_theme_provider();

    rsx! {
        Home {}
    }
}

#[component]
fn Home() -> Element {
    let theme = use_theme();
    let label = theme.get().label();

    rsx! {
        main {
            h1 { "Dark mode" }
            p { "Current theme: {label}" }
            DarkModeToggle {}
        }
    }
}
