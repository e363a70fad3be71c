//! GitHub release listing and selection
//!
//! The listing endpoint returns a JSON array of releases. Which release
//! to install is an explicit policy rather than an assumption:
//! `first-listed` takes the feed head (GitHub lists releases
//! reverse-chronologically), `highest-version` compares semver tags and
//! ignores drafts and prereleases.

use crate::error::{Error, Result};
use semver::Version;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Release listing for AutoPkg
pub const AUTOPKG_RELEASES_URL: &str = "https://api.github.com/repos/autopkg/autopkg/releases";

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v2.7.2")
    pub tag_name: String,

    /// Release name
    pub name: Option<String>,

    /// Whether this is a prerelease
    #[serde(default)]
    pub prerelease: bool,

    /// Whether this is a draft
    #[serde(default)]
    pub draft: bool,

    /// Release assets
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    /// Published date
    pub published_at: Option<String>,
}

/// Release asset
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub size: u64,
}

/// How to pick a release from the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetPolicy {
    /// First element of the feed, whatever it is
    #[default]
    FirstListed,

    /// Highest semver tag among non-draft, non-prerelease entries
    HighestVersion,
}

impl fmt::Display for AssetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetPolicy::FirstListed => write!(f, "first-listed"),
            AssetPolicy::HighestVersion => write!(f, "highest-version"),
        }
    }
}

impl FromStr for AssetPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first-listed" => Ok(AssetPolicy::FirstListed),
            "highest-version" => Ok(AssetPolicy::HighestVersion),
            other => Err(format!(
                "unknown asset policy '{}' (expected first-listed or highest-version)",
                other
            )),
        }
    }
}

/// Client for the release-listing endpoint
pub struct ReleaseClient {
    client: reqwest::Client,
    releases_url: String,
}

impl ReleaseClient {
    /// Create a client for a release-listing URL
    pub fn new(releases_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("apsetup/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            releases_url: releases_url.into(),
        })
    }

    /// The underlying HTTP client, shared with download steps
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// The listing URL this client queries
    pub fn releases_url(&self) -> &str {
        &self.releases_url
    }

    /// Fetch the release listing
    pub async fn fetch_releases(&self) -> Result<Vec<Release>> {
        debug!("Fetching releases from: {}", self.releases_url);
        let response = self.client.get(&self.releases_url).send().await?;

        if !response.status().is_success() {
            return Err(Error::ReleaseList {
                url: self.releases_url.clone(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pick a release from the listing per the given policy
pub fn select_release<'a>(
    releases: &'a [Release],
    policy: AssetPolicy,
    listing_url: &str,
) -> Result<&'a Release> {
    match policy {
        AssetPolicy::FirstListed => releases.first().ok_or_else(|| Error::NoReleases {
            url: listing_url.to_string(),
        }),
        AssetPolicy::HighestVersion => releases
            .iter()
            .filter(|r| !r.draft && !r.prerelease)
            .filter_map(|r| tag_version(&r.tag_name).map(|v| (v, r)))
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, r)| r)
            .ok_or_else(|| Error::NoVersionedRelease {
                url: listing_url.to_string(),
            }),
    }
}

/// Pick the installer asset from a release
///
/// Prefers a `.pkg` asset; falls back to the first asset when none is
/// named like one.
pub fn installer_asset(release: &Release) -> Result<&ReleaseAsset> {
    release
        .assets
        .iter()
        .find(|a| a.name.ends_with(".pkg"))
        .or_else(|| release.assets.first())
        .ok_or_else(|| Error::NoAssets {
            tag: release.tag_name.clone(),
        })
}

fn tag_version(tag: &str) -> Option<Version> {
    Version::parse(tag.trim_start_matches('v')).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(tag: &str, prerelease: bool, assets: Vec<ReleaseAsset>) -> Release {
        Release {
            tag_name: tag.to_string(),
            name: None,
            prerelease,
            draft: false,
            assets,
            published_at: None,
        }
    }

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.to_string(),
            browser_download_url: format!("https://example.com/{}", name),
            size: 1000,
        }
    }

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[
            {
                "tag_name": "v2.7.2",
                "name": "AutoPkg 2.7.2",
                "prerelease": false,
                "draft": false,
                "published_at": "2023-10-05T12:00:00Z",
                "assets": [
                    {"name": "autopkg-2.7.2.pkg",
                     "browser_download_url": "https://example.com/autopkg-2.7.2.pkg",
                     "size": 5000000}
                ]
            }
        ]"#;
        let releases: Vec<Release> = serde_json::from_str(json).unwrap();
        assert_eq!(releases[0].tag_name, "v2.7.2");
        assert_eq!(releases[0].assets[0].name, "autopkg-2.7.2.pkg");
    }

    #[test]
    fn test_first_listed_takes_feed_head() {
        let releases = vec![
            release("v2.0.0", false, vec![asset("a.pkg")]),
            release("v3.0.0", false, vec![asset("b.pkg")]),
        ];
        let selected = select_release(&releases, AssetPolicy::FirstListed, "url").unwrap();
        assert_eq!(selected.tag_name, "v2.0.0");
    }

    #[test]
    fn test_highest_version_compares_tags() {
        let releases = vec![
            release("v2.0.0", false, vec![]),
            release("v3.0.0-rc1", true, vec![]),
            release("v2.7.2", false, vec![]),
        ];
        let selected = select_release(&releases, AssetPolicy::HighestVersion, "url").unwrap();
        assert_eq!(selected.tag_name, "v2.7.2");
    }

    #[test]
    fn test_empty_listing() {
        let err = select_release(&[], AssetPolicy::FirstListed, "url").unwrap_err();
        assert!(matches!(err, Error::NoReleases { .. }));

        let unversioned = vec![release("nightly", false, vec![])];
        let err = select_release(&unversioned, AssetPolicy::HighestVersion, "url").unwrap_err();
        assert!(matches!(err, Error::NoVersionedRelease { .. }));
    }

    #[test]
    fn test_installer_asset_prefers_pkg() {
        let r = release(
            "v2.7.2",
            false,
            vec![asset("checksums.txt"), asset("autopkg-2.7.2.pkg")],
        );
        assert_eq!(installer_asset(&r).unwrap().name, "autopkg-2.7.2.pkg");
    }

    #[test]
    fn test_installer_asset_falls_back_to_first() {
        let r = release("v2.7.2", false, vec![asset("autopkg.dmg")]);
        assert_eq!(installer_asset(&r).unwrap().name, "autopkg.dmg");

        let empty = release("v2.7.2", false, vec![]);
        assert!(matches!(installer_asset(&empty), Err(Error::NoAssets { .. })));
    }

    #[test]
    fn test_asset_policy_parsing() {
        assert_eq!("first-listed".parse::<AssetPolicy>().unwrap(), AssetPolicy::FirstListed);
        assert_eq!(
            "highest-version".parse::<AssetPolicy>().unwrap(),
            AssetPolicy::HighestVersion
        );
        assert!("newest".parse::<AssetPolicy>().is_err());
    }
}
