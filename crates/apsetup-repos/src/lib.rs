//! # apsetup-repos
//!
//! Repository management for the apsetup CLI:
//! - a thin client for the AutoPkg command line (repo-add, repo-update,
//!   make-override, run)
//! - the plain-text repo-list file
//! - private recipe repos: clone-if-absent plus store registration

pub mod autopkg;
pub mod error;
pub mod private;
pub mod repo_list;

pub use autopkg::{AutopkgClient, RunRecipeOptions};
pub use error::{Error, Result};
pub use private::{PrivateRepoManager, Registration};
pub use repo_list::{load_repo_list, parse_repo_list};
