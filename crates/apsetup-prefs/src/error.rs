//! Error types for apsetup-prefs

use thiserror::Error;

/// Result type alias using apsetup-prefs's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Preference-store error types
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a well-formed property list
    #[error("Malformed preference store: {0}")]
    Format(#[from] plist::Error),

    /// Well-formed property list whose root is not a dictionary
    #[error("Preference store root is not a dictionary")]
    NotADictionary,

    /// Store file does not exist at the resolved path
    #[error("Preference store not found: {path}")]
    StoreNotFound { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a store not found error
    pub fn store_not_found(path: impl Into<String>) -> Self {
        Self::StoreNotFound { path: path.into() }
    }
}
