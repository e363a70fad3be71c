//! Path resolution for AutoPkg's well-known locations

use crate::error::{Error, Result};
use camino::Utf8PathBuf;

/// Default location of the AutoPkg preference store
pub const DEFAULT_PREFS_LOCATION: &str = "~/Library/Preferences/com.github.autopkg.plist";

/// Directory AutoPkg keeps recipe repo clones under, relative to home
const RECIPE_REPOS_SUBDIR: &str = "Library/AutoPkg/RecipeRepos";

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// env overrides (sudo -u, launchd contexts, tests) behave the same way
/// shell scripts do.
pub fn get_home_dir() -> Result<Utf8PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(Utf8PathBuf::from(home));
    }

    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Utf8PathBuf::from_path_buf(home).map_err(|p| Error::invalid_path(p.display().to_string()))
}

/// Expand a leading `~` or `~/` against the home directory
///
/// Paths without a tilde prefix are returned unchanged.
pub fn expand_tilde(path: &str) -> Result<Utf8PathBuf> {
    if path == "~" {
        return get_home_dir();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(get_home_dir()?.join(rest));
    }
    Ok(Utf8PathBuf::from(path))
}

/// Directory private recipe repos are cloned into
pub fn recipe_repos_dir() -> Result<Utf8PathBuf> {
    Ok(get_home_dir()?.join(RECIPE_REPOS_SUBDIR))
}
