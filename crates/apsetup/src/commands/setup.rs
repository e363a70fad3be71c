//! Setup command - the full provisioning sequence

use anyhow::Result;
use apsetup_install::download::DEFAULT_ARTIFACT_PATH;
use apsetup_install::{ProvisionOptions, Provisioner};
use apsetup_repos::AutopkgClient;
use camino::Utf8PathBuf;
use dialoguer::Confirm;

use crate::cli::SetupArgs;
use crate::output;

pub async fn run(args: SetupArgs) -> Result<()> {
    output::header("AutoPkg provisioning");
    output::kv("Desired state", args.prefs_file.as_str());
    output::kv("Repo list", args.repo_list.as_str());
    output::kv("Release policy", &args.asset_policy.to_policy().to_string());

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Download and install AutoPkg, then reconcile preferences?")
            .default(true)
            .interact()?;

        if !proceed {
            output::info("Setup cancelled");
            return Ok(());
        }
    }

    let opts = ProvisionOptions {
        desired_state_file: args.prefs_file,
        repo_list_file: args.repo_list,
        releases_url: args.releases_url,
        asset_policy: args.asset_policy.to_policy(),
        rebuild_repo_entries: args.rebuild_repo_entries,
        install_extension: !args.skip_extension,
        artifact_path: Utf8PathBuf::from(DEFAULT_ARTIFACT_PATH),
    };

    let mut provisioner =
        Provisioner::new(opts).with_autopkg(AutopkgClient::new(args.autopkg_bin));
    provisioner.run().await?;

    output::success("Provisioning complete");
    Ok(())
}
