//! Seams over the page: the themed element and the color-scheme query.

use crate::error::Result;

/// The parts of a document the theme controller touches.
pub trait ThemeDocument {
    /// Whether the target element carries `class`.
    fn has_class(&self, class: &str) -> Result<bool>;

    fn add_class(&mut self, class: &str) -> Result<()>;

    fn remove_class(&mut self, class: &str) -> Result<()>;

    /// Mark every control matching the class `selector` (`.name`) as checked.
    /// Returns how many controls were found.
    fn check_all(&mut self, selector: &str) -> Result<usize>;
}

/// Platform query for the operating system's color-scheme preference.
pub trait ColorSchemeQuery {
    /// `None` when the platform cannot answer the query at all.
    fn prefers_dark(&self) -> Option<bool>;
}

/// Resolve the system preference, treating a missing capability as light.
pub fn system_prefers_dark(query: &impl ColorSchemeQuery) -> bool {
    query.prefers_dark().unwrap_or(false)
}
