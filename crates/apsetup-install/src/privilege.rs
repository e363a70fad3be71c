//! Privilege preflight
//!
//! The tool runs as a regular user and prompts for elevation only for
//! the install steps that need it. A wholesale root invocation would
//! write root-owned state into the user's preference store and clones,
//! so it is rejected before any network or filesystem action.

use crate::error::{Error, Result};
use nix::unistd::Uid;
use tracing::debug;

/// Fail when the effective uid is root
pub fn check_not_root() -> Result<()> {
    if Uid::effective().is_root() {
        return Err(Error::RunningAsRoot);
    }
    debug!("Running unprivileged (euid {})", Uid::effective());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprivileged_passes() {
        // CI and dev environments run unprivileged; a root test run would
        // legitimately be rejected here
        if !Uid::effective().is_root() {
            check_not_root().unwrap();
        } else {
            assert!(matches!(check_not_root(), Err(Error::RunningAsRoot)));
        }
    }
}
