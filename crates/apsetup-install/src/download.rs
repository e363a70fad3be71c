//! Artifact download and cleanup

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::fs;
use tracing::info;

/// Where the installer package is staged
pub const DEFAULT_ARTIFACT_PATH: &str = "/tmp/autopkg-latest.pkg";

/// Fetch a URL to a file, failing on any non-success status
pub async fn fetch_to_path(client: &reqwest::Client, url: &str, dest: &Utf8Path) -> Result<()> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Download {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let bytes = response.bytes().await?;
    fs::write(dest, &bytes)?;
    info!("Downloaded {} ({} bytes)", dest, bytes.len());
    Ok(())
}

/// Remove a staged artifact
///
/// An already-absent file is fine; any other failure is reported so real
/// I/O problems are not masked.
pub fn remove_artifact(path: &Utf8Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
