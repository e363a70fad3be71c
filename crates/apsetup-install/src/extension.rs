//! JSSImporter extension install
//!
//! The extension is installed through AutoPkg's own recipe mechanism:
//! register the repo that owns the install recipe, generate an override,
//! run it. Afterwards the installed processor file is overwritten with
//! the latest revision from its testing branch. That overwrite
//! deliberately bypasses AutoPkg's versioning; it is a known side
//! channel, not an accident, and goes away once the beta settles.

use crate::download::fetch_to_path;
use crate::error::Result;
use apsetup_core::exec::run_live;
use apsetup_repos::{AutopkgClient, RunRecipeOptions};
use camino::Utf8Path;
use tracing::info;

/// Recipe repo that owns the extension's install recipe
pub const EXTENSION_RECIPE_REPO: &str = "grahampugh/recipes";

/// Install recipe for the extension
pub const EXTENSION_RECIPE: &str = "JSSImporterBeta.install";

const LATEST_PROCESSOR_URL: &str =
    "https://raw.githubusercontent.com/grahampugh/JSSImporter/testing/JSSImporter.py";
const STAGING_PATH: &str = "/tmp/JSSImporter.py";
const INSTALLED_PATH: &str = "/Library/AutoPkg/autopkglib/JSSImporter.py";

/// Installs the JSSImporter extension via AutoPkg
pub struct ExtensionInstaller<'a> {
    autopkg: &'a AutopkgClient,
    http: reqwest::Client,
}

impl<'a> ExtensionInstaller<'a> {
    /// Create an installer sharing an existing HTTP client
    pub fn with_client(autopkg: &'a AutopkgClient, http: reqwest::Client) -> Self {
        Self { autopkg, http }
    }

    /// Create an installer with its own HTTP client
    pub fn new(autopkg: &'a AutopkgClient) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("apsetup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(autopkg, http))
    }

    /// Run the full extension install
    pub async fn install(&self) -> Result<()> {
        self.autopkg.repo_add(EXTENSION_RECIPE_REPO).await?;
        self.autopkg.make_override(EXTENSION_RECIPE).await?;
        self.autopkg
            .run_recipe(EXTENSION_RECIPE, &RunRecipeOptions::default())
            .await?;

        self.overwrite_with_latest().await?;
        info!("Installed latest JSSImporter");
        Ok(())
    }

    /// Replace the installed processor with the testing-branch revision
    async fn overwrite_with_latest(&self) -> Result<()> {
        let staging = Utf8Path::new(STAGING_PATH);
        fetch_to_path(&self.http, LATEST_PROCESSOR_URL, staging).await?;
        run_live("/usr/bin/sudo", &["mv", STAGING_PATH, INSTALLED_PATH]).await?;
        Ok(())
    }
}
