//! The provisioning sequence
//!
//! A linear state machine: every step either advances the machine or
//! moves it to `Failed` and stops. Optional steps (repo registration,
//! preference reconciliation, repo update) degrade to a warning instead
//! of failing the run; everything on the install path is fatal. There is
//! no retry logic anywhere — re-running the tool is the recovery path,
//! which is why each step is idempotent.

use crate::download::{fetch_to_path, remove_artifact, DEFAULT_ARTIFACT_PATH};
use crate::error::Result;
use crate::extension::ExtensionInstaller;
use crate::installer::{ensure_command_line_tools, install_pkg};
use crate::privilege::check_not_root;
use crate::releases::{
    installer_asset, select_release, AssetPolicy, ReleaseClient, AUTOPKG_RELEASES_URL,
};
use apsetup_core::DesiredState;
use apsetup_prefs::{read_store, reconcile, write_store, ReconcileOptions};
use apsetup_repos::{load_repo_list, AutopkgClient, PrivateRepoManager};
use camino::Utf8PathBuf;
use std::fmt;
use tracing::{debug, info, warn};

/// Where the provisioning sequence currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    NotStarted,
    PrivilegeChecked,
    Downloaded,
    Installed,
    ReposRegistered,
    PrefsReconciled,
    ReposUpdated,
    ExtensionInstalled,
    Done,
    Failed,
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProvisionState::NotStarted => "not-started",
            ProvisionState::PrivilegeChecked => "privilege-checked",
            ProvisionState::Downloaded => "downloaded",
            ProvisionState::Installed => "installed",
            ProvisionState::ReposRegistered => "repos-registered",
            ProvisionState::PrefsReconciled => "prefs-reconciled",
            ProvisionState::ReposUpdated => "repos-updated",
            ProvisionState::ExtensionInstalled => "extension-installed",
            ProvisionState::Done => "done",
            ProvisionState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Inputs to a provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Desired-state file; absent means skip reconciliation
    pub desired_state_file: Utf8PathBuf,

    /// Repo-list file; absent means skip repo registration
    pub repo_list_file: Utf8PathBuf,

    /// Release-listing endpoint
    pub releases_url: String,

    /// How to pick the release to install
    pub asset_policy: AssetPolicy,

    /// Repair missing/malformed distribution-point entries in place
    pub rebuild_repo_entries: bool,

    /// Run the extension install step
    pub install_extension: bool,

    /// Where the installer package is staged
    pub artifact_path: Utf8PathBuf,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            desired_state_file: Utf8PathBuf::from("autopkg-preferences.yaml"),
            repo_list_file: Utf8PathBuf::from("autopkg-repo-list.txt"),
            releases_url: AUTOPKG_RELEASES_URL.to_string(),
            asset_policy: AssetPolicy::default(),
            rebuild_repo_entries: false,
            install_extension: true,
            artifact_path: Utf8PathBuf::from(DEFAULT_ARTIFACT_PATH),
        }
    }
}

/// Drives the provisioning sequence
pub struct Provisioner {
    opts: ProvisionOptions,
    autopkg: AutopkgClient,
    state: ProvisionState,
}

impl Provisioner {
    /// Create a provisioner with the default AutoPkg client
    pub fn new(opts: ProvisionOptions) -> Self {
        Self {
            opts,
            autopkg: AutopkgClient::default(),
            state: ProvisionState::NotStarted,
        }
    }

    /// Use a specific AutoPkg client (tests, nonstandard install paths)
    pub fn with_autopkg(mut self, autopkg: AutopkgClient) -> Self {
        self.autopkg = autopkg;
        self
    }

    /// Current state of the machine
    pub fn state(&self) -> ProvisionState {
        self.state
    }

    /// Run the sequence to completion or first fatal error
    pub async fn run(&mut self) -> Result<()> {
        let result = self.run_steps().await;
        if result.is_err() {
            self.state = ProvisionState::Failed;
        }
        result
    }

    async fn run_steps(&mut self) -> Result<()> {
        check_not_root()?;
        ensure_command_line_tools().await?;
        self.advance(ProvisionState::PrivilegeChecked);

        let releases = ReleaseClient::new(&self.opts.releases_url)?;
        let listing = releases.fetch_releases().await?;
        let release = select_release(&listing, self.opts.asset_policy, releases.releases_url())?;
        let asset = installer_asset(release)?;
        info!("Selected release {} ({})", release.tag_name, asset.name);
        fetch_to_path(
            releases.http(),
            &asset.browser_download_url,
            &self.opts.artifact_path,
        )
        .await?;
        self.advance(ProvisionState::Downloaded);

        // An install failure is surfaced, but never before cleanup runs
        let install_result = install_pkg(&self.opts.artifact_path).await;
        if let Err(e) = remove_artifact(&self.opts.artifact_path) {
            warn!("Could not remove downloaded artifact: {}", e);
        }
        install_result?;
        self.advance(ProvisionState::Installed);

        self.register_repos().await;
        self.advance(ProvisionState::ReposRegistered);

        self.reconcile_prefs().await;
        self.advance(ProvisionState::PrefsReconciled);

        // Reconciles repos that were already registered before this run
        if let Err(e) = self.autopkg.repo_update_all().await {
            warn!("Repo update failed: {}", e);
        }
        self.advance(ProvisionState::ReposUpdated);

        if self.opts.install_extension {
            ExtensionInstaller::with_client(&self.autopkg, releases.http().clone())
                .install()
                .await?;
        } else {
            info!("Extension install disabled; skipping");
        }
        self.advance(ProvisionState::ExtensionInstalled);

        self.advance(ProvisionState::Done);
        Ok(())
    }

    fn advance(&mut self, next: ProvisionState) {
        debug!("{} -> {}", self.state, next);
        self.state = next;
    }

    /// Register every repo named in the repo-list file. Optional step:
    /// a missing file or a failing add degrades to a warning.
    async fn register_repos(&self) {
        let repos = match load_repo_list(&self.opts.repo_list_file) {
            Ok(Some(repos)) => repos,
            Ok(None) => {
                warn!(
                    "No repo list at {}; skipping repo registration",
                    self.opts.repo_list_file
                );
                return;
            }
            Err(e) => {
                warn!("Could not read repo list: {}", e);
                return;
            }
        };

        for repo in repos {
            if let Err(e) = self.autopkg.repo_add(&repo).await {
                warn!("Could not add repo {}: {}", repo, e);
            }
        }
    }

    /// Reconcile the preference store and register private repos.
    /// Optional step: every failure path degrades to a warning. The store
    /// is read once and written at most once.
    async fn reconcile_prefs(&self) {
        let desired = match DesiredState::load(&self.opts.desired_state_file) {
            Ok(Some(desired)) => desired,
            Ok(None) => {
                warn!(
                    "No desired-state file at {}; continuing with existing preferences",
                    self.opts.desired_state_file
                );
                return;
            }
            Err(e) => {
                warn!("Could not parse desired-state file: {}", e);
                return;
            }
        };

        let store_path = match desired.prefs_path() {
            Ok(path) => path,
            Err(e) => {
                warn!("Could not resolve preference store path: {}", e);
                return;
            }
        };

        let mut store = match read_store(&store_path) {
            Ok(store) => store,
            Err(e) => {
                warn!("Could not read preference store: {}", e);
                return;
            }
        };

        let reconcile_opts = ReconcileOptions {
            rebuild_repo_entries: self.opts.rebuild_repo_entries,
        };
        let summary = reconcile(&mut store, &desired, &reconcile_opts);
        for index in &summary.skipped_repo_indexes {
            warn!(
                "Distribution-point entry {} could not be updated; \
                 re-run with entry rebuilding enabled to repair it",
                index
            );
        }

        let mut registry_changed = false;
        if !desired.private_repos.is_empty() {
            match PrivateRepoManager::from_home() {
                Ok(manager) => {
                    for private in &desired.private_repos {
                        match manager.ensure_clone(&private.dir, &private.url).await {
                            Ok(_) => {
                                let registration =
                                    manager.register(&mut store, &private.dir, &private.url);
                                registry_changed |= registration.changed();
                            }
                            Err(e) => {
                                warn!("Could not clone private repo {}: {}", private.dir, e)
                            }
                        }
                    }
                }
                Err(e) => warn!("Could not locate recipe-repos directory: {}", e),
            }
        }

        if summary.changed || registry_changed {
            match write_store(&store_path, &store) {
                Ok(()) => info!("Updated AutoPkg preferences at {}", store_path),
                Err(e) => warn!("Could not write preference store: {}", e),
            }
        } else {
            info!("AutoPkg preferences already match desired state");
        }
    }
}
