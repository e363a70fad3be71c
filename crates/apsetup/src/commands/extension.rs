//! Extension commands - JSSImporter install

use anyhow::Result;
use apsetup_install::{check_not_root, ExtensionInstaller};
use apsetup_repos::AutopkgClient;

use crate::cli::{ExtensionCommands, ExtensionInstallArgs};
use crate::output;

pub async fn run(cmd: ExtensionCommands) -> Result<()> {
    match cmd {
        ExtensionCommands::Install(args) => install(args).await,
    }
}

async fn install(args: ExtensionInstallArgs) -> Result<()> {
    check_not_root()?;

    let autopkg = AutopkgClient::new(args.autopkg_bin);
    ExtensionInstaller::new(&autopkg)?.install().await?;

    output::success("JSSImporter installed");
    Ok(())
}
