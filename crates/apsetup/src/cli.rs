//! CLI argument parsing with clap

use apsetup_install::releases::AUTOPKG_RELEASES_URL;
use apsetup_install::AssetPolicy;
use apsetup_repos::autopkg::DEFAULT_AUTOPKG_BIN;
use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Apsetup - idempotent AutoPkg + JSSImporter provisioning
#[derive(Parser, Debug)]
#[command(name = "apsetup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full provisioning sequence
    Setup(SetupArgs),

    /// Preference-store management
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Recipe-repo management
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Extension management
    #[command(subcommand)]
    Extension(ExtensionCommands),

    /// Show version information
    Version(VersionArgs),
}

/// Release selection policy
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AssetPolicyArg {
    /// First element of the release feed (reverse-chronological on GitHub)
    FirstListed,

    /// Highest semver tag among non-draft, non-prerelease entries
    HighestVersion,
}

impl AssetPolicyArg {
    pub fn to_policy(self) -> AssetPolicy {
        match self {
            AssetPolicyArg::FirstListed => AssetPolicy::FirstListed,
            AssetPolicyArg::HighestVersion => AssetPolicy::HighestVersion,
        }
    }
}

// Setup command
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Path to the desired-state file
    #[arg(long, default_value = "autopkg-preferences.yaml")]
    pub prefs_file: Utf8PathBuf,

    /// Path to the repo-list file
    #[arg(long, default_value = "autopkg-repo-list.txt")]
    pub repo_list: Utf8PathBuf,

    /// Release-listing endpoint
    #[arg(long, default_value = AUTOPKG_RELEASES_URL)]
    pub releases_url: String,

    /// How to pick the release to install
    #[arg(long, value_enum, default_value_t = AssetPolicyArg::FirstListed)]
    pub asset_policy: AssetPolicyArg,

    /// Repair missing or malformed distribution-point entries in place
    #[arg(long)]
    pub rebuild_repo_entries: bool,

    /// Skip the JSSImporter install step
    #[arg(long)]
    pub skip_extension: bool,

    /// Path to the AutoPkg binary
    #[arg(long, default_value = DEFAULT_AUTOPKG_BIN)]
    pub autopkg_bin: Utf8PathBuf,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

// Prefs commands
#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Reconcile the desired state into the preference store
    Apply(PrefsApplyArgs),

    /// Show the current preference store (passwords redacted)
    Show(PrefsShowArgs),
}

#[derive(Args, Debug)]
pub struct PrefsApplyArgs {
    /// Path to the desired-state file
    #[arg(long, default_value = "autopkg-preferences.yaml")]
    pub prefs_file: Utf8PathBuf,

    /// Repair missing or malformed distribution-point entries in place
    #[arg(long)]
    pub rebuild_repo_entries: bool,
}

#[derive(Args, Debug)]
pub struct PrefsShowArgs {
    /// Preference store location (defaults to AutoPkg's own)
    #[arg(long)]
    pub prefs_location: Option<String>,
}

// Repo commands
#[derive(Subcommand, Debug)]
pub enum RepoCommands {
    /// Register one or more recipe repos
    Add(RepoAddArgs),

    /// Clone and register a private recipe repo
    AddPrivate(RepoAddPrivateArgs),

    /// Update all registered recipe repos
    Update(RepoUpdateArgs),

    /// Register every repo named in the repo-list file
    Sync(RepoSyncArgs),
}

#[derive(Args, Debug)]
pub struct RepoAddArgs {
    /// Repo identifiers or clone URLs
    #[arg(required = true)]
    pub repos: Vec<String>,

    /// Path to the AutoPkg binary
    #[arg(long, default_value = DEFAULT_AUTOPKG_BIN)]
    pub autopkg_bin: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct RepoAddPrivateArgs {
    /// Directory name for the local clone
    pub dir: String,

    /// Clone URL
    pub url: String,

    /// Preference store location (defaults to AutoPkg's own)
    #[arg(long)]
    pub prefs_location: Option<String>,
}

#[derive(Args, Debug)]
pub struct RepoUpdateArgs {
    /// Path to the AutoPkg binary
    #[arg(long, default_value = DEFAULT_AUTOPKG_BIN)]
    pub autopkg_bin: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct RepoSyncArgs {
    /// Path to the repo-list file
    #[arg(long, default_value = "autopkg-repo-list.txt")]
    pub repo_list: Utf8PathBuf,

    /// Path to the AutoPkg binary
    #[arg(long, default_value = DEFAULT_AUTOPKG_BIN)]
    pub autopkg_bin: Utf8PathBuf,
}

// Extension commands
#[derive(Subcommand, Debug)]
pub enum ExtensionCommands {
    /// Install JSSImporter via AutoPkg's own recipe mechanism
    Install(ExtensionInstallArgs),
}

#[derive(Args, Debug)]
pub struct ExtensionInstallArgs {
    /// Path to the AutoPkg binary
    #[arg(long, default_value = DEFAULT_AUTOPKG_BIN)]
    pub autopkg_bin: Utf8PathBuf,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
