//! Typed registration of recipe repos and search directories
//!
//! The original tooling probed these sections with raw text matching;
//! here membership is checked on the parsed structures, so a partial
//! path never counts as a match. Both operations are independently
//! idempotent and report whether they changed the store.

use plist::{Dictionary, Value};
use tracing::warn;

/// Dictionary of registered recipe repos, keyed by clone path
pub const RECIPE_REPOS_KEY: &str = "RECIPE_REPOS";

/// Flat list of directories searched for recipes
pub const RECIPE_SEARCH_DIRS_KEY: &str = "RECIPE_SEARCH_DIRS";

/// Register a recipe repo clone under `RECIPE_REPOS`
///
/// Returns true when the store was changed. An existing registration is
/// left exactly as it is, whatever else it contains.
pub fn register_recipe_repo(store: &mut Dictionary, clone_path: &str, url: &str) -> bool {
    if store.get(RECIPE_REPOS_KEY).is_none() {
        store.insert(RECIPE_REPOS_KEY.into(), Value::Dictionary(Dictionary::new()));
    }

    let Some(repos) = store.get_mut(RECIPE_REPOS_KEY).and_then(Value::as_dictionary_mut) else {
        warn!("{} is not a dictionary; leaving it untouched", RECIPE_REPOS_KEY);
        return false;
    };

    if repos.contains_key(clone_path) {
        return false;
    }

    let mut entry = Dictionary::new();
    entry.insert("URL".into(), Value::String(url.to_string()));
    repos.insert(clone_path.to_string(), Value::Dictionary(entry));
    true
}

/// Append a clone path to `RECIPE_SEARCH_DIRS` unless already present
///
/// Membership is an exact string-element comparison, not a substring
/// scan. Returns true when the store was changed.
pub fn register_search_dir(store: &mut Dictionary, clone_path: &str) -> bool {
    if store.get(RECIPE_SEARCH_DIRS_KEY).is_none() {
        store.insert(RECIPE_SEARCH_DIRS_KEY.into(), Value::Array(Vec::new()));
    }

    let Some(dirs) = store.get_mut(RECIPE_SEARCH_DIRS_KEY).and_then(Value::as_array_mut) else {
        warn!("{} is not an array; leaving it untouched", RECIPE_SEARCH_DIRS_KEY);
        return false;
    };

    if dirs.iter().any(|v| v.as_string() == Some(clone_path)) {
        return false;
    }

    dirs.push(Value::String(clone_path.to_string()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_repo_registered_once() {
        let mut store = Dictionary::new();
        let path = "/Users/admin/Library/AutoPkg/RecipeRepos/internal";
        let url = "git@example.com:it/internal.git";

        assert!(register_recipe_repo(&mut store, path, url));
        assert!(!register_recipe_repo(&mut store, path, url));

        let repos = store.get(RECIPE_REPOS_KEY).and_then(Value::as_dictionary).unwrap();
        assert_eq!(repos.len(), 1);
        let entry = repos.get(path).and_then(Value::as_dictionary).unwrap();
        assert_eq!(entry.get("URL").and_then(Value::as_string), Some(url));
    }

    #[test]
    fn test_existing_registration_untouched() {
        let mut existing = Dictionary::new();
        existing.insert("URL".into(), Value::String("git@old.example.com:old.git".into()));
        let mut repos = Dictionary::new();
        repos.insert("/repos/internal".into(), Value::Dictionary(existing));
        let mut store = Dictionary::new();
        store.insert(RECIPE_REPOS_KEY.into(), Value::Dictionary(repos));

        let changed = register_recipe_repo(&mut store, "/repos/internal", "git@new.example.com:new.git");

        assert!(!changed);
        let repos = store.get(RECIPE_REPOS_KEY).and_then(Value::as_dictionary).unwrap();
        let entry = repos.get("/repos/internal").and_then(Value::as_dictionary).unwrap();
        assert_eq!(
            entry.get("URL").and_then(Value::as_string),
            Some("git@old.example.com:old.git")
        );
    }

    #[test]
    fn test_search_dir_appended_once() {
        let mut store = Dictionary::new();
        let path = "/repos/internal";

        assert!(register_search_dir(&mut store, path));
        assert!(!register_search_dir(&mut store, path));

        let dirs = store.get(RECIPE_SEARCH_DIRS_KEY).and_then(Value::as_array).unwrap();
        assert_eq!(dirs.len(), 1);
    }

    #[test]
    fn test_search_dir_membership_is_exact() {
        let mut store = Dictionary::new();
        store.insert(
            RECIPE_SEARCH_DIRS_KEY.into(),
            Value::Array(vec![Value::String("/repos/internal-recipes".into())]),
        );

        // A prefix of an existing element is still absent
        assert!(register_search_dir(&mut store, "/repos/internal"));

        let dirs = store.get(RECIPE_SEARCH_DIRS_KEY).and_then(Value::as_array).unwrap();
        assert_eq!(dirs.len(), 2);
    }

    #[test]
    fn test_wrong_shape_left_alone() {
        let mut store = Dictionary::new();
        store.insert(RECIPE_REPOS_KEY.into(), Value::String("bogus".into()));
        store.insert(RECIPE_SEARCH_DIRS_KEY.into(), Value::String("bogus".into()));

        assert!(!register_recipe_repo(&mut store, "/repos/x", "url"));
        assert!(!register_search_dir(&mut store, "/repos/x"));

        assert_eq!(store.get(RECIPE_REPOS_KEY).and_then(Value::as_string), Some("bogus"));
        assert_eq!(
            store.get(RECIPE_SEARCH_DIRS_KEY).and_then(Value::as_string),
            Some("bogus")
        );
    }
}
