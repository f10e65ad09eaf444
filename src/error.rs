//! Error types for environment backends.
//!
//! Controller operations never surface these to callers; they are logged and
//! the operation degrades to a no-op, the way a browser silently ignores a
//! cookie write when cookies are disabled.

use thiserror::Error;

/// Failure while parsing a `Set-Cookie`-style assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("malformed cookie assignment {assignment:?}: {source}")]
    Malformed {
        assignment: String,
        source: cookie::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Cookie(#[from] CookieError),

    /// A DOM call threw; carries the debug rendering of the thrown value.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("invalid theme config: {0}")]
    Config(#[from] serde_json::Error),

    /// A platform capability (window, document, element) is missing.
    #[error("{0} is not available")]
    Unavailable(&'static str),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
