//! OS package installation and developer-tools preflight

use crate::error::{Error, Result};
use apsetup_core::exec::{run_checked, run_live};
use camino::Utf8Path;
use tracing::{debug, info, warn};

const SUDO_BIN: &str = "/usr/bin/sudo";
const INSTALLER_BIN: &str = "/usr/sbin/installer";

/// Install a package with the OS installer, elevated
///
/// This is the one step that needs elevation; sudo prompts the operator
/// directly on the inherited terminal.
pub async fn install_pkg(pkg_path: &Utf8Path) -> Result<()> {
    info!(
        "Installing {} (enter your password if prompted)",
        pkg_path
    );
    run_live(SUDO_BIN, &[INSTALLER_BIN, "-pkg", pkg_path.as_str(), "-target", "/"]).await?;
    Ok(())
}

/// Verify the Xcode command line tools are present
///
/// Git and the compiler toolchain live there; cloning recipe repos fails
/// without them. When missing, trigger the interactive installer and ask
/// the operator to re-run. On platforms without xcode-select the check is
/// a no-op.
pub async fn ensure_command_line_tools() -> Result<()> {
    if which::which("xcode-select").is_err() {
        debug!("xcode-select not present; skipping command line tools check");
        return Ok(());
    }

    if run_checked("xcode-select", &["-p"]).await.is_ok() {
        debug!("Command line tools present");
        return Ok(());
    }

    warn!("Xcode command line tools not found; triggering installation");
    if let Err(e) = run_live("xcode-select", &["--install"]).await {
        warn!("Could not trigger command line tools install: {}", e);
    }
    Err(Error::CommandLineToolsMissing)
}
