//! Error types for the markdown-mathjax library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
///
/// Only the two broken-installation conditions are fatal: a script template
/// that fails to substitute, and a template override file that cannot be
/// read. Settings resolution is total and the host integrations degrade with
/// a warning instead of failing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("MathJax script template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
