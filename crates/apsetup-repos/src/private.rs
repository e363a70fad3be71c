//! Private recipe repos
//!
//! A private repo is declared as a directory name and a clone URL. The
//! clone lands at a deterministic path under the recipe-repos directory;
//! the directory's existence is the sole idempotency signal for the
//! clone. Store registration is two independent operations (dictionary
//! entry, search-dir list entry), each idempotent on its own, so a run
//! interrupted between them completes cleanly on the next attempt.

use crate::error::Result;
use apsetup_core::exec::run_live;
use apsetup_core::paths::recipe_repos_dir;
use apsetup_prefs::{read_store, register_recipe_repo, register_search_dir, write_store, Dictionary};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::{debug, info};

/// Outcome of registering a private repo in the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registration {
    /// A `RECIPE_REPOS` entry was added
    pub repo_added: bool,

    /// A `RECIPE_SEARCH_DIRS` entry was appended
    pub search_dir_added: bool,
}

impl Registration {
    /// Whether either operation changed the store
    pub fn changed(&self) -> bool {
        self.repo_added || self.search_dir_added
    }
}

/// Manages clones and registration of private recipe repos
#[derive(Debug, Clone)]
pub struct PrivateRepoManager {
    base_dir: Utf8PathBuf,
}

impl PrivateRepoManager {
    /// Create a manager rooted at an explicit clone directory
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a manager rooted at AutoPkg's recipe-repos directory
    pub fn from_home() -> Result<Self> {
        Ok(Self::new(recipe_repos_dir()?))
    }

    /// Deterministic clone path for a declared directory name
    pub fn clone_path(&self, dir_name: &str) -> Utf8PathBuf {
        self.base_dir.join(dir_name)
    }

    /// Clone the repo unless its directory already exists
    ///
    /// Returns true when a clone was performed.
    pub async fn ensure_clone(&self, dir_name: &str, url: &str) -> Result<bool> {
        let dest = self.clone_path(dir_name);
        if dest.is_dir() {
            debug!("Clone already present at {}", dest);
            return Ok(false);
        }

        fs::create_dir_all(&self.base_dir)?;
        info!("Cloning {} -> {}", url, dest);
        run_live("git", &["clone", url, dest.as_str()]).await?;
        Ok(true)
    }

    /// Register the repo's clone path in the store mapping
    ///
    /// Both checks are typed membership tests; an existing entry is never
    /// duplicated or rewritten.
    pub fn register(&self, store: &mut Dictionary, dir_name: &str, url: &str) -> Registration {
        let clone_path = self.clone_path(dir_name);
        Registration {
            repo_added: register_recipe_repo(store, clone_path.as_str(), url),
            search_dir_added: register_search_dir(store, clone_path.as_str()),
        }
    }

    /// Clone and register a private repo against the store file
    ///
    /// Standalone read-modify-write form; the provisioning sequence folds
    /// registration into its single store pass instead.
    pub async fn ensure_private_repo(
        &self,
        dir_name: &str,
        url: &str,
        store_path: &Utf8Path,
    ) -> Result<Registration> {
        self.ensure_clone(dir_name, url).await?;

        let mut store = read_store(store_path)?;
        let registration = self.register(&mut store, dir_name, url);
        if registration.changed() {
            write_store(store_path, &store)?;
            info!("Registered private repo {} in {}", dir_name, store_path);
        } else {
            debug!("Private repo {} already registered", dir_name);
        }
        Ok(registration)
    }
}
