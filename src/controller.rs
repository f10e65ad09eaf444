//! Theme preference controller.
//!
//! Owns the document, cookie store and color-scheme query it operates on, so
//! the same code runs against the browser (`crate::web`) and against the
//! in-memory environment (`crate::memory`). The bootstrap "already applied"
//! guard is a plain field: every entry point runs on the single UI thread.

use chrono::{DateTime, Utc};

use crate::config::{SwitchSync, ThemeConfig};
use crate::cookie::{find_cookie, theme_cookie, CookieStore};
use crate::document::{system_prefers_dark, ColorSchemeQuery, ThemeDocument};
use crate::preference::{StoredTheme, ThemeMode, ThemePreference};

/// Lifetime of the cookie written by `toggle`, in days.
pub const TOGGLE_TTL_DAYS: i64 = 1;

/// Page lifecycle callbacks that may trigger the initial theme application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleSignal {
    AnimationFrame,
    DomContentLoaded,
}

/// Outcome of the bootstrap decision, computed once per page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootstrapPlan {
    pub preference: ThemePreference,
    pub system_prefers_dark: bool,
    /// Whether the initial application step should run.
    pub apply_dark: bool,
}

pub struct ThemePreferenceController<D, C, M> {
    document: D,
    cookies: C,
    media: M,
    config: ThemeConfig,
    plan: Option<BootstrapPlan>,
    applied: bool,
}

impl<D, C, M> ThemePreferenceController<D, C, M>
where
    D: ThemeDocument,
    C: CookieStore,
    M: ColorSchemeQuery,
{
    pub fn new(document: D, cookies: C, media: M) -> Self {
        Self::with_config(document, cookies, media, ThemeConfig::default())
    }

    pub fn with_config(document: D, cookies: C, media: M, config: ThemeConfig) -> Self {
        Self {
            document,
            cookies,
            media,
            config,
            plan: None,
            applied: false,
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn cookies(&self) -> &C {
        &self.cookies
    }

    /// Bootstrap decision, if `bootstrap` has run.
    pub fn plan(&self) -> Option<BootstrapPlan> {
        self.plan
    }

    /// Whether the guarded initial application has already fired.
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Read the persisted preference. A missing or unreadable cookie is `Unset`.
    pub fn get_preference(&self) -> ThemePreference {
        let header = match self.cookies.read() {
            Ok(header) => header,
            Err(e) => {
                tracing::warn!("Failed to read cookies: {}", e);
                return ThemePreference::Unset;
            }
        };
        let raw = find_cookie(&header, &self.config.cookie_name);
        ThemePreference::from_cookie_value(raw.as_deref())
    }

    /// Persist `value` for `ttl_days` days from now.
    pub fn set_preference(&mut self, value: StoredTheme, ttl_days: i64) {
        self.set_preference_at(value, ttl_days, Utc::now());
    }

    /// `set_preference` against an explicit clock.
    pub fn set_preference_at(&mut self, value: StoredTheme, ttl_days: i64, now: DateTime<Utc>) {
        self.write_cookie(value.as_str(), ttl_days, now);
    }

    /// Expire the theme cookie so the browser drops it.
    pub fn clear_preference(&mut self) {
        self.clear_preference_at(Utc::now());
    }

    pub fn clear_preference_at(&mut self, now: DateTime<Utc>) {
        self.write_cookie("", -1, now);
    }

    fn write_cookie(&mut self, value: &str, ttl_days: i64, now: DateTime<Utc>) {
        let assignment = theme_cookie(
            &self.config.cookie_name,
            value,
            &self.config.cookie_path,
            ttl_days,
            now,
        );
        if let Err(e) = self.cookies.write(&assignment.to_string()) {
            tracing::warn!("Failed to write {} cookie: {}", self.config.cookie_name, e);
        }
    }

    /// Current visual state of the target element.
    pub fn current_mode(&self) -> ThemeMode {
        match self.document.has_class(&self.config.dark_class) {
            Ok(dark) => ThemeMode::from(dark),
            Err(e) => {
                tracing::warn!("Failed to read theme class: {}", e);
                ThemeMode::Light
            }
        }
    }

    /// Flip the visual state and persist the new value with the toggle TTL.
    pub fn toggle(&mut self) -> ThemeMode {
        self.toggle_at(Utc::now())
    }

    pub fn toggle_at(&mut self, now: DateTime<Utc>) -> ThemeMode {
        let next = match self.current_mode() {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };

        let class = self.config.dark_class.clone();
        let result = match next {
            ThemeMode::Dark => self.document.add_class(&class),
            ThemeMode::Light => self.document.remove_class(&class),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to update theme class: {}", e);
        }

        self.set_preference_at(next.stored(), TOGGLE_TTL_DAYS, now);
        tracing::debug!("Theme toggled to {}", next.label());
        next
    }

    /// Decide whether this page load should apply dark mode.
    ///
    /// Idempotent: later calls return the first decision.
    pub fn bootstrap(&mut self) -> BootstrapPlan {
        if let Some(plan) = self.plan {
            return plan;
        }

        let system_prefers_dark = system_prefers_dark(&self.media);
        let preference = self.get_preference();
        let plan = BootstrapPlan {
            preference,
            system_prefers_dark,
            apply_dark: preference.resolves_dark(system_prefers_dark),
        };
        tracing::debug!(
            "Theme bootstrap: preference={:?} system_dark={} apply_dark={}",
            preference,
            system_prefers_dark,
            plan.apply_dark
        );
        self.plan = Some(plan);
        plan
    }

    /// Run the initial application at most once per controller.
    ///
    /// Returns true only for the call that actually toggled the theme.
    pub fn apply_initial(&mut self) -> bool {
        self.apply_initial_at(Utc::now())
    }

    pub fn apply_initial_at(&mut self, now: DateTime<Utc>) -> bool {
        let plan = self.bootstrap();
        if !plan.apply_dark || self.applied {
            return false;
        }
        self.applied = true;
        let mode = self.toggle_at(now);
        tracing::info!("Applied initial theme: {}", mode.label());
        true
    }

    /// Mark every toggle-switch control as checked, subject to `switch_sync`.
    ///
    /// Returns the number of controls updated.
    pub fn sync_toggle_switches(&mut self) -> usize {
        let plan = self.bootstrap();
        if self.config.switch_sync == SwitchSync::WhenDark && !plan.apply_dark {
            return 0;
        }
        match self.document.check_all(&self.config.switch_selector()) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Failed to sync toggle switches: {}", e);
                0
            }
        }
    }

    /// Route a lifecycle callback. Both signals may arrive in either order.
    pub fn on_lifecycle(&mut self, signal: LifecycleSignal) {
        self.on_lifecycle_at(signal, Utc::now());
    }

    pub fn on_lifecycle_at(&mut self, signal: LifecycleSignal, now: DateTime<Utc>) {
        tracing::debug!("Lifecycle signal: {:?}", signal);
        self.apply_initial_at(now);
        if signal == LifecycleSignal::DomContentLoaded {
            let count = self.sync_toggle_switches();
            tracing::debug!("Checked {} toggle switch(es)", count);
        }
    }
}
