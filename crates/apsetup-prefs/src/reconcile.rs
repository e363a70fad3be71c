//! Reconciliation of desired state into the preference store
//!
//! Field-by-field and list-entry-by-list-entry merge. Only non-empty
//! desired values are applied; keys and list entries present in the store
//! but absent from the desired state are never removed. Distribution-point
//! entries are matched by position; repairing a missing or malformed entry
//! is destructive to that one index and therefore opt-in.

use apsetup_core::{DesiredState, RepoEntry};
use plist::{Dictionary, Value};
use tracing::{debug, warn};

/// Store key holding the distribution-point list
const JSS_REPOS_KEY: &str = "JSS_REPOS";

/// Scalar keys applied straight from desired state
const SCALAR_KEYS: &[(&str, fn(&DesiredState) -> &Option<String>)] = &[
    ("JSS_URL", |d| &d.jss_url),
    ("API_USERNAME", |d| &d.api_username),
    ("API_PASSWORD", |d| &d.api_password),
];

/// Behavior switches for a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Rebuild a missing or malformed distribution-point entry in place.
    /// Off by default: without it the affected index is skipped with a
    /// warning and the rest of the merge proceeds.
    pub rebuild_repo_entries: bool,
}

/// Outcome of a reconciliation pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Whether the store differs from its pre-merge state
    pub changed: bool,

    /// Distribution-point indexes left untouched because the store entry
    /// was missing or malformed and rebuilding was not enabled
    pub skipped_repo_indexes: Vec<usize>,
}

/// Merge desired state into the store mapping
///
/// The caller persists the mapping afterwards, and only when
/// `ReconcileSummary::changed` is set, so an unchanged store is never
/// rewritten.
pub fn reconcile(
    store: &mut Dictionary,
    desired: &DesiredState,
    opts: &ReconcileOptions,
) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for (key, field) in SCALAR_KEYS {
        if let Some(value) = non_empty(field(desired)) {
            set_string(store, key, value, &mut summary);
        }
    }

    for (index, entry) in desired.jss_repos.iter().enumerate() {
        apply_repo_entry(store, index, entry, opts, &mut summary);
    }

    debug!(
        changed = summary.changed,
        skipped = summary.skipped_repo_indexes.len(),
        "Reconciliation pass complete"
    );
    summary
}

/// Apply one positional distribution-point entry
fn apply_repo_entry(
    store: &mut Dictionary,
    index: usize,
    entry: &RepoEntry,
    opts: &ReconcileOptions,
    summary: &mut ReconcileSummary,
) {
    let repo_type = non_empty(&entry.repo_type);
    let name = non_empty(&entry.name);
    if repo_type.is_none() && name.is_none() {
        return;
    }

    let Some(slot) = repo_slot(store, index, opts, summary) else {
        summary.skipped_repo_indexes.push(index);
        return;
    };

    if let Some(t) = repo_type {
        set_string(slot, "type", t, summary);
    } else if let Some(n) = name {
        set_string(slot, "name", n, summary);
        if let Some(p) = non_empty(&entry.password) {
            set_string(slot, "password", p, summary);
        }
    }
}

/// Locate (or, when rebuilding is enabled, create) the dictionary at
/// `JSS_REPOS[index]`
fn repo_slot<'a>(
    store: &'a mut Dictionary,
    index: usize,
    opts: &ReconcileOptions,
    summary: &mut ReconcileSummary,
) -> Option<&'a mut Dictionary> {
    match store.get(JSS_REPOS_KEY) {
        Some(Value::Array(_)) => {}
        Some(_) => {
            if !opts.rebuild_repo_entries {
                warn!(
                    index,
                    "{} is not an array; skipping entry (enable entry rebuilding to repair)",
                    JSS_REPOS_KEY
                );
                return None;
            }
            warn!("{} is not an array; replacing it with an empty list", JSS_REPOS_KEY);
            store.insert(JSS_REPOS_KEY.into(), Value::Array(Vec::new()));
            summary.changed = true;
        }
        None => {
            if !opts.rebuild_repo_entries {
                warn!(
                    index,
                    "{} is absent from the store; skipping entry (enable entry rebuilding to create it)",
                    JSS_REPOS_KEY
                );
                return None;
            }
            store.insert(JSS_REPOS_KEY.into(), Value::Array(Vec::new()));
            summary.changed = true;
        }
    }

    let list = match store.get_mut(JSS_REPOS_KEY) {
        Some(Value::Array(list)) => list,
        _ => return None,
    };

    if list.len() <= index {
        if !opts.rebuild_repo_entries {
            warn!(
                index,
                len = list.len(),
                "Store has no distribution-point entry at this index; skipping"
            );
            return None;
        }
        warn!(index, "Creating empty distribution-point entries up to this index");
        while list.len() <= index {
            list.push(Value::Dictionary(Dictionary::new()));
        }
        summary.changed = true;
    }

    if !matches!(list[index], Value::Dictionary(_)) {
        if !opts.rebuild_repo_entries {
            warn!(index, "Distribution-point entry is not a dictionary; skipping");
            return None;
        }
        warn!(index, "Replacing malformed distribution-point entry");
        list[index] = Value::Dictionary(Dictionary::new());
        summary.changed = true;
    }

    match &mut list[index] {
        Value::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Set a string key, recording a change only when the value differs
fn set_string(dict: &mut Dictionary, key: &str, value: &str, summary: &mut ReconcileSummary) {
    if dict.get(key).and_then(Value::as_string) == Some(value) {
        return;
    }
    dict.insert(key.to_string(), Value::String(value.to_string()));
    summary.changed = true;
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
