//! Shared UI components.

pub mod theme;

pub use theme::DarkModeToggle;
