//! # apsetup-install
//!
//! Provisioning orchestration for the apsetup CLI:
//! - privilege and command-line-tools preflight
//! - GitHub release listing and installer download
//! - elevated package installation
//! - the JSSImporter extension install
//! - the linear provisioning state machine tying it all together

pub mod download;
pub mod error;
pub mod extension;
pub mod installer;
pub mod privilege;
pub mod provision;
pub mod releases;

pub use error::{Error, Result};
pub use extension::ExtensionInstaller;
pub use privilege::check_not_root;
pub use provision::{ProvisionOptions, ProvisionState, Provisioner};
pub use releases::{installer_asset, select_release, AssetPolicy, Release, ReleaseClient};
