//! In-memory environment for tests and non-browser hosts.
//!
//! `MemoryCookieJar` follows browser rules closely enough to exercise the
//! controller: assignments are parsed, expired cookies disappear, and reads
//! return the `name=value; name=value` view in insertion order.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use cookie::Cookie;

use crate::cookie::{cookie_expiry, CookieStore};
use crate::document::{ColorSchemeQuery, ThemeDocument};
use crate::error::{CookieError, Result};

/// A toggle-switch control on a `MemoryDocument`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySwitch {
    pub class: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    classes: BTreeSet<String>,
    switches: Vec<MemorySwitch>,
    class_mutations: usize,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `class` already present on the target element.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    /// Add `count` unchecked controls carrying `class`.
    pub fn with_switches(mut self, class: &str, count: usize) -> Self {
        for _ in 0..count {
            self.switches.push(MemorySwitch {
                class: class.to_string(),
                checked: false,
            });
        }
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn switches(&self) -> &[MemorySwitch] {
        &self.switches
    }

    /// Number of class additions and removals applied so far.
    pub fn class_mutations(&self) -> usize {
        self.class_mutations
    }
}

impl ThemeDocument for MemoryDocument {
    fn has_class(&self, class: &str) -> Result<bool> {
        Ok(self.contains(class))
    }

    fn add_class(&mut self, class: &str) -> Result<()> {
        self.classes.insert(class.to_string());
        self.class_mutations += 1;
        Ok(())
    }

    fn remove_class(&mut self, class: &str) -> Result<()> {
        self.classes.remove(class);
        self.class_mutations += 1;
        Ok(())
    }

    fn check_all(&mut self, selector: &str) -> Result<usize> {
        let class = selector.strip_prefix('.').unwrap_or(selector);
        let mut count = 0;
        for switch in self.switches.iter_mut().filter(|s| s.class == class) {
            switch.checked = true;
            count += 1;
        }
        Ok(count)
    }
}

#[derive(Debug, Clone)]
struct JarEntry {
    name: String,
    value: String,
    expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct MemoryCookieJar {
    entries: Vec<JarEntry>,
    writes: Vec<String>,
    now: DateTime<Utc>,
    disabled: bool,
}

impl Default for MemoryCookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            writes: Vec::new(),
            now: Utc::now(),
            disabled: false,
        }
    }

    /// A jar that accepts writes and silently drops them.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    /// Pre-seed a session cookie.
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.entries.push(JarEntry {
            name: name.to_string(),
            value: value.to_string(),
            expires: None,
        });
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Move the jar's clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Every assignment string written so far, including ignored ones.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.live()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    /// Expiry of a live cookie, if it has one.
    pub fn expires(&self, name: &str) -> Option<DateTime<Utc>> {
        self.live().find(|e| e.name == name).and_then(|e| e.expires)
    }

    fn live(&self) -> impl Iterator<Item = &JarEntry> {
        let now = self.now;
        self.entries
            .iter()
            .filter(move |e| e.expires.map_or(true, |at| at > now))
    }
}

impl CookieStore for MemoryCookieJar {
    fn read(&self) -> Result<String> {
        Ok(self
            .live()
            .map(|e| format!("{}={}", e.name, e.value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write(&mut self, assignment: &str) -> Result<()> {
        self.writes.push(assignment.to_string());
        if self.disabled {
            return Ok(());
        }

        let parsed = Cookie::parse(assignment).map_err(|source| CookieError::Malformed {
            assignment: assignment.to_string(),
            source,
        })?;
        let name = parsed.name().to_string();
        let value = parsed.value().to_string();
        let expires = cookie_expiry(&parsed, self.now);
        let expired = expires.is_some_and(|at| at <= self.now);
        let position = self.entries.iter().position(|e| e.name == name);

        match (position, expired) {
            (Some(i), true) => {
                self.entries.remove(i);
            }
            (None, true) => {}
            (Some(i), false) => {
                self.entries[i].value = value;
                self.entries[i].expires = expires;
            }
            (None, false) => self.entries.push(JarEntry {
                name,
                value,
                expires,
            }),
        }
        Ok(())
    }
}

/// Color-scheme query with a fixed answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedColorScheme(pub Option<bool>);

impl FixedColorScheme {
    pub fn dark() -> Self {
        Self(Some(true))
    }

    pub fn light() -> Self {
        Self(Some(false))
    }

    pub fn unsupported() -> Self {
        Self(None)
    }
}

impl ColorSchemeQuery for FixedColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::theme_cookie;

    #[test]
    fn jar_upserts_and_joins_cookies() {
        let mut jar = MemoryCookieJar::new().with_cookie("sid", "abc");
        jar.write("theme=dark;path=/").unwrap();
        assert_eq!(jar.read().unwrap(), "sid=abc; theme=dark");

        jar.write("theme=light;path=/").unwrap();
        assert_eq!(jar.read().unwrap(), "sid=abc; theme=light");
    }

    #[test]
    fn expired_cookies_disappear() {
        let mut jar = MemoryCookieJar::new();
        let assignment = theme_cookie("theme", "dark", "/", 1, jar.now());
        jar.write(&assignment.to_string()).unwrap();
        assert_eq!(jar.get("theme"), Some("dark"));

        jar.advance(Duration::days(1) + Duration::seconds(1));
        assert_eq!(jar.get("theme"), None);
        assert_eq!(jar.read().unwrap(), "");
    }

    #[test]
    fn past_expiry_deletes_existing_cookie() {
        let mut jar = MemoryCookieJar::new().with_cookie("theme", "dark");
        let assignment = theme_cookie("theme", "", "/", -1, jar.now());
        jar.write(&assignment.to_string()).unwrap();
        assert_eq!(jar.get("theme"), None);
    }

    #[test]
    fn disabled_jar_records_but_ignores_writes() {
        let mut jar = MemoryCookieJar::disabled();
        jar.write("theme=dark").unwrap();
        assert_eq!(jar.writes().len(), 1);
        assert_eq!(jar.read().unwrap(), "");
    }

    #[test]
    fn malformed_write_is_rejected() {
        let mut jar = MemoryCookieJar::new();
        assert!(matches!(
            jar.write("nonsense"),
            Err(crate::error::ThemeError::Cookie(CookieError::Malformed { .. }))
        ));
        assert!(jar.write("=dark").is_err());
    }

    #[test]
    fn max_age_zero_deletes_cookie() {
        let mut jar = MemoryCookieJar::new().with_cookie("theme", "dark");
        jar.write("theme=; Max-Age=0").unwrap();
        assert_eq!(jar.get("theme"), None);
    }

    #[test]
    fn check_all_only_touches_marked_switches() {
        let mut doc = MemoryDocument::new()
            .with_switches("dark-mode-toggle", 2)
            .with_switches("other", 1);
        assert_eq!(doc.check_all(".dark-mode-toggle").unwrap(), 2);
        let checked: Vec<bool> = doc.switches().iter().map(|s| s.checked).collect();
        assert_eq!(checked, vec![true, true, false]);
    }
}
