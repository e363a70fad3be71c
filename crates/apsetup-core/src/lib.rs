//! # apsetup-core
//!
//! Core library for the apsetup CLI providing:
//! - Desired-state file parsing (autopkg-preferences.yaml)
//! - Subprocess execution helpers
//! - Path resolution for AutoPkg's well-known locations

pub mod desired;
pub mod error;
pub mod exec;
pub mod paths;

pub use desired::{DesiredState, PrivateRepo, RepoEntry};
pub use error::{Error, Result};
pub use paths::get_home_dir;
