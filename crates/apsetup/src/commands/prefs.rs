//! Prefs commands - reconcile and inspect the preference store

use anyhow::Result;
use apsetup_core::paths::{expand_tilde, DEFAULT_PREFS_LOCATION};
use apsetup_core::DesiredState;
use apsetup_prefs::registry::{RECIPE_REPOS_KEY, RECIPE_SEARCH_DIRS_KEY};
use apsetup_prefs::{read_store, reconcile, write_store, ReconcileOptions, Value};

use crate::cli::{PrefsApplyArgs, PrefsCommands, PrefsShowArgs};
use crate::output;

pub async fn run(cmd: PrefsCommands) -> Result<()> {
    match cmd {
        PrefsCommands::Apply(args) => apply(args),
        PrefsCommands::Show(args) => show(args),
    }
}

fn apply(args: PrefsApplyArgs) -> Result<()> {
    let desired = match DesiredState::load(&args.prefs_file)? {
        Some(desired) => desired,
        None => {
            output::warning(&format!(
                "No desired-state file at {}; nothing to apply",
                args.prefs_file
            ));
            return Ok(());
        }
    };

    let store_path = desired.prefs_path()?;
    let mut store = match read_store(&store_path) {
        Ok(store) => store,
        Err(apsetup_prefs::Error::StoreNotFound { path }) => {
            output::warning(&format!(
                "No preference store at {}; run AutoPkg once to create it",
                path
            ));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let opts = ReconcileOptions {
        rebuild_repo_entries: args.rebuild_repo_entries,
    };
    let summary = reconcile(&mut store, &desired, &opts);

    for index in &summary.skipped_repo_indexes {
        output::warning(&format!(
            "Distribution-point entry {} could not be updated; re-run with --rebuild-repo-entries to repair it",
            index
        ));
    }

    if !desired.private_repos.is_empty() {
        output::info(
            "Private repos are registered by `apsetup repo add-private` or the setup sequence",
        );
    }

    if summary.changed {
        write_store(&store_path, &store)?;
        output::success(&format!("Updated preferences at {}", store_path));
    } else {
        output::info("Preferences already match desired state");
    }

    Ok(())
}

fn show(args: PrefsShowArgs) -> Result<()> {
    let location = args
        .prefs_location
        .unwrap_or_else(|| DEFAULT_PREFS_LOCATION.to_string());
    let path = expand_tilde(&location)?;
    let store = read_store(&path)?;

    output::header(&format!("Preferences at {}", path));

    let string_of = |key: &str| {
        store
            .get(key)
            .and_then(Value::as_string)
            .unwrap_or("(unset)")
            .to_string()
    };
    output::kv("JSS_URL", &string_of("JSS_URL"));
    output::kv("API_USERNAME", &string_of("API_USERNAME"));
    let password = if store.get("API_PASSWORD").is_some() {
        "(set)"
    } else {
        "(unset)"
    };
    output::kv("API_PASSWORD", password);

    let repo_count = store
        .get("JSS_REPOS")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    output::kv("JSS_REPOS", &format!("{} entries", repo_count));

    let recipe_repo_count = store
        .get(RECIPE_REPOS_KEY)
        .and_then(Value::as_dictionary)
        .map(|d| d.len())
        .unwrap_or(0);
    output::kv(RECIPE_REPOS_KEY, &format!("{} entries", recipe_repo_count));

    if let Some(dirs) = store.get(RECIPE_SEARCH_DIRS_KEY).and_then(Value::as_array) {
        output::kv(RECIPE_SEARCH_DIRS_KEY, &format!("{} entries", dirs.len()));
        for dir in dirs {
            if let Some(dir) = dir.as_string() {
                println!("    - {}", dir);
            }
        }
    }

    Ok(())
}
