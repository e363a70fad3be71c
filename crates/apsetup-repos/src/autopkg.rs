//! Client for the AutoPkg command line
//!
//! All operations run with inherited stdio so AutoPkg's own progress
//! output reaches the operator. `repo_add` is called unconditionally:
//! AutoPkg's repo-add is a no-op for repos it already knows, so
//! idempotency is delegated to the tool instead of pre-checking
//! membership here.

use crate::error::Result;
use apsetup_core::exec::run_live;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::info;

/// Default install location of the AutoPkg binary
pub const DEFAULT_AUTOPKG_BIN: &str = "/usr/local/bin/autopkg";

/// Options for running a recipe
#[derive(Debug, Clone, Default)]
pub struct RunRecipeOptions {
    /// Write a run report plist to this path
    pub report_plist: Option<Utf8PathBuf>,

    /// Hand an already-built package to the recipe
    pub pkg_path: Option<Utf8PathBuf>,
}

/// Wrapper around the AutoPkg binary
#[derive(Debug, Clone)]
pub struct AutopkgClient {
    binary: Utf8PathBuf,
}

impl Default for AutopkgClient {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOPKG_BIN)
    }
}

impl AutopkgClient {
    /// Create a client for an AutoPkg binary at a specific path
    pub fn new(binary: impl Into<Utf8PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Path of the wrapped binary
    pub fn binary(&self) -> &Utf8Path {
        &self.binary
    }

    /// Register a recipe repo (no-op when already registered)
    pub async fn repo_add(&self, repo: &str) -> Result<()> {
        info!("Adding recipe repo: {}", repo);
        run_live(self.binary.as_str(), &["repo-add", repo]).await?;
        Ok(())
    }

    /// Update every registered recipe repo
    pub async fn repo_update_all(&self) -> Result<()> {
        info!("Updating all recipe repos");
        run_live(self.binary.as_str(), &["repo-update", "all"]).await?;
        Ok(())
    }

    /// Generate an override for a recipe
    pub async fn make_override(&self, recipe: &str) -> Result<()> {
        info!("Creating override for recipe: {}", recipe);
        run_live(self.binary.as_str(), &["make-override", recipe]).await?;
        Ok(())
    }

    /// Execute a recipe
    pub async fn run_recipe(&self, recipe: &str, options: &RunRecipeOptions) -> Result<()> {
        info!("Running recipe: {}", recipe);
        let args = recipe_args(recipe, options);
        run_live(self.binary.as_str(), &args).await?;
        Ok(())
    }
}

fn recipe_args<'a>(recipe: &'a str, options: &'a RunRecipeOptions) -> Vec<&'a str> {
    let mut args = vec!["run", "-v", recipe];
    if let Some(pkg) = &options.pkg_path {
        args.push("-p");
        args.push(pkg.as_str());
    }
    if let Some(report) = &options.report_plist {
        args.push("--report-plist");
        args.push(report.as_str());
    }
    args
}
