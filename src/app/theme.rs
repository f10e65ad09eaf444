//! Theme context backed by the cookie-persisted preference controller.
//!
//! Mirrors the page's visual state into a signal so components re-render
//! when the theme changes.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::preference::ThemeMode;

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub mode: Signal<ThemeMode>,
    /// Page configuration the controller was installed with.
    pub config: Signal<ThemeConfig>,
}

impl ThemeContext {
    /// Get current visual mode
    pub fn get(&self) -> ThemeMode {
        (self.mode)()
    }

    /// Marker class the bootstrap syncs toggle switches by.
    pub fn switch_class(&self) -> String {
        self.config.read().switch_class.clone()
    }

    /// Flip the theme, persist it, and publish the new mode.
    pub fn toggle(&self) {
        let mut mode = self.mode;

        #[cfg(target_arch = "wasm32")]
        {
            match crate::web::installed() {
                Some(controller) => {
                    let next = controller.borrow_mut().toggle();
                    mode.set(next);
                }
                None => tracing::warn!("Theme toggle before controller install"),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let next = match mode() {
                ThemeMode::Dark => ThemeMode::Light,
                ThemeMode::Light => ThemeMode::Dark,
            };
            mode.set(next);
        }
    }
}

/// Initialize theme context provider - call once at app root
pub fn use_theme_provider() {
    let mode = use_signal(ThemeMode::default);
    let config = use_signal(load_config);

    let ctx = ThemeContext { mode, config };
    use_context_provider(|| ctx);

    // Client-side only: run the page bootstrap and pick up the applied mode
    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            let mut mode = mode;
            match crate::web::install(config.peek().clone()) {
                Ok(controller) => {
                    let current = controller.borrow().current_mode();
                    mode.set(current);
                }
                Err(e) => tracing::warn!("Theme bootstrap failed: {}", e),
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> ThemeConfig {
    crate::web::load_page_config()
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> ThemeConfig {
    ThemeConfig::default()
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}
