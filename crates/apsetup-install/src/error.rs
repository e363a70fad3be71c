//! Error types for apsetup-install

use thiserror::Error;

/// Result type alias using apsetup-install's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// Invoked with superuser identity
    #[error(
        "This tool must not be run as root. Re-run it as a regular user; \
         it prompts for elevation only where the installer needs it"
    )]
    RunningAsRoot,

    /// Xcode command line tools are not installed
    #[error(
        "Xcode command line tools are missing. Installation was triggered; \
         re-run this tool once it completes"
    )]
    CommandLineToolsMissing,

    /// Release listing endpoint returned a non-success status
    #[error("Release listing request to {url} failed with status {status}")]
    ReleaseList { url: String, status: u16 },

    /// Release listing was empty
    #[error("No releases available at {url}")]
    NoReleases { url: String },

    /// No release carried a version-parseable tag
    #[error("No release with a parseable version tag at {url}")]
    NoVersionedRelease { url: String },

    /// Selected release has no assets
    #[error("Release {tag} has no downloadable assets")]
    NoAssets { tag: String },

    /// Artifact download returned a non-success status
    #[error("Download of {url} failed with status {status}")]
    Download { url: String, status: u16 },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core error (process execution, paths)
    #[error("Core error: {0}")]
    Core(#[from] apsetup_core::Error),

    /// Preference-store error
    #[error("Preference store error: {0}")]
    Prefs(#[from] apsetup_prefs::Error),

    /// Repository management error
    #[error("Repository error: {0}")]
    Repos(#[from] apsetup_repos::Error),
}
