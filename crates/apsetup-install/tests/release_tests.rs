//! Release listing, download, and orchestrator failure-path tests
//!
//! HTTP endpoints are stood up with wiremock so no real network is
//! touched.

use apsetup_install::{
    installer_asset, select_release, AssetPolicy, Error, ProvisionOptions, ProvisionState,
    Provisioner, ReleaseClient,
};
use apsetup_install::download::fetch_to_path;
use camino::Utf8PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing_body(server_uri: &str) -> serde_json::Value {
    serde_json::json!([
        {
            "tag_name": "v2.7.2",
            "name": "AutoPkg 2.7.2",
            "prerelease": false,
            "draft": false,
            "published_at": "2023-10-05T12:00:00Z",
            "assets": [
                {
                    "name": "autopkg-2.7.2.pkg",
                    "browser_download_url": format!("{}/autopkg-2.7.2.pkg", server_uri),
                    "size": 9
                }
            ]
        },
        {
            "tag_name": "v2.7.1",
            "name": "AutoPkg 2.7.1",
            "prerelease": false,
            "draft": false,
            "published_at": "2023-08-01T12:00:00Z",
            "assets": []
        }
    ])
}

#[tokio::test]
async fn fetch_and_select_first_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&server.uri())))
        .mount(&server)
        .await;

    let client = ReleaseClient::new(format!("{}/releases", server.uri())).unwrap();
    let releases = client.fetch_releases().await.unwrap();
    assert_eq!(releases.len(), 2);

    let release = select_release(&releases, AssetPolicy::FirstListed, client.releases_url()).unwrap();
    assert_eq!(release.tag_name, "v2.7.2");
    let asset = installer_asset(release).unwrap();
    assert_eq!(asset.name, "autopkg-2.7.2.pkg");
}

#[tokio::test]
async fn listing_404_is_a_release_list_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ReleaseClient::new(format!("{}/releases", server.uri())).unwrap();
    let err = client.fetch_releases().await.unwrap_err();
    assert!(matches!(err, Error::ReleaseList { status: 404, .. }));
}

#[tokio::test]
async fn download_writes_destination_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/autopkg-2.7.2.pkg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pkg bytes".to_vec()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let dest = Utf8PathBuf::from_path_buf(temp.path().join("autopkg-latest.pkg")).unwrap();

    let client = reqwest::Client::new();
    fetch_to_path(&client, &format!("{}/autopkg-2.7.2.pkg", server.uri()), &dest)
        .await
        .unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"pkg bytes");
}

#[tokio::test]
async fn download_failure_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/autopkg-2.7.2.pkg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let dest = Utf8PathBuf::from_path_buf(temp.path().join("autopkg-latest.pkg")).unwrap();

    let client = reqwest::Client::new();
    let err = fetch_to_path(&client, &format!("{}/autopkg-2.7.2.pkg", server.uri()), &dest)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Download { status: 500, .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn provisioning_halts_before_install_when_listing_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/releases"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let artifact = Utf8PathBuf::from_path_buf(temp.path().join("autopkg-latest.pkg")).unwrap();

    let opts = ProvisionOptions {
        releases_url: format!("{}/releases", server.uri()),
        artifact_path: artifact.clone(),
        ..ProvisionOptions::default()
    };

    let mut provisioner = Provisioner::new(opts);
    let err = provisioner.run().await.unwrap_err();

    assert!(matches!(err, Error::ReleaseList { status: 404, .. }));
    assert_eq!(provisioner.state(), ProvisionState::Failed);
    // the install step was never reached, so nothing was staged
    assert!(!artifact.exists());
}
