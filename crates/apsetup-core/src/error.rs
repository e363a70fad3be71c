//! Error types for apsetup-core

use thiserror::Error;

/// Result type alias using apsetup-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for apsetup
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid desired-state file
    #[error("Invalid desired-state file: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External command not found on PATH
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// External command ran but reported failure
    #[error("Command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Home directory could not be determined
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Path is not valid UTF-8
    #[error("Path is not valid UTF-8: {path}")]
    InvalidPath { path: String },
}

impl Error {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }
}
