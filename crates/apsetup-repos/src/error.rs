//! Error types for apsetup-repos

use thiserror::Error;

/// Result type alias using apsetup-repos's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Repository management error types
#[derive(Error, Debug)]
pub enum Error {
    /// Core error (process execution, paths)
    #[error("Core error: {0}")]
    Core(#[from] apsetup_core::Error),

    /// Preference-store error
    #[error("Preference store error: {0}")]
    Prefs(#[from] apsetup_prefs::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
