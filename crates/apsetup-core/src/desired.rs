//! Desired-state file parsing
//!
//! The desired state is a human-authored YAML document
//! (`autopkg-preferences.yaml`) describing the operator's intended AutoPkg
//! configuration for this run. Every field except the preference-store
//! location is optional; absent fields deserialize to `None`/empty so the
//! reconciliation engine can distinguish "not specified" from "explicitly
//! empty".

use crate::error::Result;
use crate::paths::expand_tilde;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;

/// Declarative description of the intended AutoPkg configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DesiredState {
    /// Path to the preference store, tilde-expandable
    #[serde(rename = "AUTOPKG_PREFS_LOCATION")]
    pub prefs_location: String,

    /// Jamf Pro server URL
    #[serde(rename = "JSS_URL", default)]
    pub jss_url: Option<String>,

    /// API account name
    #[serde(rename = "API_USERNAME", default)]
    pub api_username: Option<String>,

    /// API account password
    #[serde(rename = "API_PASSWORD", default)]
    pub api_password: Option<String>,

    /// Distribution-point entries, matched to store entries by position
    #[serde(rename = "JSS_REPOS", default)]
    pub jss_repos: Vec<RepoEntry>,

    /// Private recipe repos to clone and register
    #[serde(rename = "PRIVATE_REPOS", default)]
    pub private_repos: Vec<PrivateRepo>,
}

/// One distribution-point entry; fields are independently optional and
/// independently overwritten in the store
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RepoEntry {
    #[serde(rename = "type", default)]
    pub repo_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// One private recipe repo declaration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrivateRepo {
    /// Directory name of the local clone under the recipe-repos dir
    pub dir: String,

    /// Clone URL
    pub url: String,
}

impl DesiredState {
    /// Load the desired state from a YAML file
    ///
    /// Returns `Ok(None)` when the file does not exist; callers treat that
    /// as "use external defaults, skip reconciliation". A file that exists
    /// but does not parse is an error.
    pub fn load(path: &Utf8Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let desired: DesiredState = serde_yaml_ng::from_str(&content)?;
        if desired.prefs_location.trim().is_empty() {
            return Err(crate::Error::invalid_config(
                "AUTOPKG_PREFS_LOCATION must not be empty",
            ));
        }
        Ok(Some(desired))
    }

    /// The preference-store path with any leading tilde expanded
    pub fn prefs_path(&self) -> Result<Utf8PathBuf> {
        expand_tilde(&self.prefs_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_absent_file_is_none() {
        let result = DesiredState::load(Utf8Path::new("/tmp/no-such-desired-state-41d7.yaml"));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_yaml_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("autopkg-preferences.yaml");
        fs::write(&path, "AUTOPKG_PREFS_LOCATION: [unterminated").unwrap();

        let utf8 = Utf8PathBuf::from_path_buf(path).unwrap();
        let err = DesiredState::load(&utf8).unwrap_err();
        assert!(matches!(err, crate::Error::YamlParse(_)));
    }

    #[test]
    fn test_load_empty_store_location_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("autopkg-preferences.yaml");
        fs::write(&path, "AUTOPKG_PREFS_LOCATION: \"\"\n").unwrap();

        let utf8 = Utf8PathBuf::from_path_buf(path).unwrap();
        let err = DesiredState::load(&utf8).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_minimal_document() {
        let desired: DesiredState =
            serde_yaml_ng::from_str("AUTOPKG_PREFS_LOCATION: /tmp/prefs.plist\n").unwrap();
        assert_eq!(desired.prefs_location, "/tmp/prefs.plist");
        assert!(desired.jss_url.is_none());
        assert!(desired.api_username.is_none());
        assert!(desired.jss_repos.is_empty());
        assert!(desired.private_repos.is_empty());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
AUTOPKG_PREFS_LOCATION: ~/Library/Preferences/com.github.autopkg.plist
JSS_URL: https://jss.example.com
API_USERNAME: autopkg
API_PASSWORD: hunter2
JSS_REPOS:
  - name: dp1
    password: secret
  - type: SMB
PRIVATE_REPOS:
  - dir: internal-recipes
    url: git@example.com:it/internal-recipes.git
"#;
        let desired: DesiredState = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(desired.jss_url.as_deref(), Some("https://jss.example.com"));
        assert_eq!(desired.jss_repos.len(), 2);
        assert_eq!(desired.jss_repos[0].name.as_deref(), Some("dp1"));
        assert!(desired.jss_repos[0].repo_type.is_none());
        assert_eq!(desired.jss_repos[1].repo_type.as_deref(), Some("SMB"));
        assert_eq!(desired.private_repos[0].dir, "internal-recipes");
    }

    #[test]
    fn test_explicit_empty_differs_from_absent() {
        let yaml = "AUTOPKG_PREFS_LOCATION: /tmp/p.plist\nJSS_URL: \"\"\n";
        let desired: DesiredState = serde_yaml_ng::from_str(yaml).unwrap();
        // Explicitly empty is Some(""), never a placeholder
        assert_eq!(desired.jss_url.as_deref(), Some(""));
        assert!(desired.api_username.is_none());
    }

    #[test]
    fn test_prefs_path_expansion() {
        let desired: DesiredState =
            serde_yaml_ng::from_str("AUTOPKG_PREFS_LOCATION: ~/Library/Preferences/a.plist\n")
                .unwrap();
        let path = desired.prefs_path().unwrap();
        assert!(!path.as_str().starts_with('~'));
        assert!(path.as_str().ends_with("Library/Preferences/a.plist"));
    }
}
