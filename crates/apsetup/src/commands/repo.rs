//! Repo commands - recipe-repo registration and updates

use anyhow::Result;
use apsetup_core::paths::{expand_tilde, DEFAULT_PREFS_LOCATION};
use apsetup_repos::{load_repo_list, AutopkgClient, PrivateRepoManager};

use crate::cli::{RepoAddArgs, RepoAddPrivateArgs, RepoCommands, RepoSyncArgs, RepoUpdateArgs};
use crate::output;

pub async fn run(cmd: RepoCommands) -> Result<()> {
    match cmd {
        RepoCommands::Add(args) => add(args).await,
        RepoCommands::AddPrivate(args) => add_private(args).await,
        RepoCommands::Update(args) => update(args).await,
        RepoCommands::Sync(args) => sync(args).await,
    }
}

async fn add(args: RepoAddArgs) -> Result<()> {
    let autopkg = AutopkgClient::new(args.autopkg_bin);
    for repo in &args.repos {
        autopkg.repo_add(repo).await?;
    }
    output::success(&format!("Registered {} repo(s)", args.repos.len()));
    Ok(())
}

async fn add_private(args: RepoAddPrivateArgs) -> Result<()> {
    let location = args
        .prefs_location
        .unwrap_or_else(|| DEFAULT_PREFS_LOCATION.to_string());
    let store_path = expand_tilde(&location)?;

    let manager = PrivateRepoManager::from_home()?;
    let registration = manager
        .ensure_private_repo(&args.dir, &args.url, &store_path)
        .await?;

    if registration.changed() {
        output::success(&format!("Private repo {} registered", args.dir));
    } else {
        output::info(&format!("Private repo {} already registered", args.dir));
    }
    Ok(())
}

async fn update(args: RepoUpdateArgs) -> Result<()> {
    AutopkgClient::new(args.autopkg_bin).repo_update_all().await?;
    output::success("All repos updated");
    Ok(())
}

async fn sync(args: RepoSyncArgs) -> Result<()> {
    let repos = match load_repo_list(&args.repo_list)? {
        Some(repos) => repos,
        None => {
            output::warning(&format!(
                "No repo list at {}; nothing to register",
                args.repo_list
            ));
            return Ok(());
        }
    };

    let autopkg = AutopkgClient::new(args.autopkg_bin);
    for repo in &repos {
        autopkg.repo_add(repo).await?;
    }
    output::success(&format!("Registered {} repo(s) from {}", repos.len(), args.repo_list));
    Ok(())
}
