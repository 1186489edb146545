//! Tests for the HTTP release client against a mock server

use super::common::{index_json, PLATFORM_FILE};
use goup::core::GoupError;
use goup::di::mocks::MockConfigProvider;
use goup::di::ReleaseSource;
use goup::release::{ReleaseClient, ReleaseFile};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ReleaseClient {
    ReleaseClient::new(Arc::new(MockConfigProvider::new(&server.uri()))).unwrap()
}

fn platform_file(size: u64) -> ReleaseFile {
    ReleaseFile {
        filename: PLATFORM_FILE.to_string(),
        os: "linux".to_string(),
        arch: "amd64".to_string(),
        version: "go1.22.3".to_string(),
        sha256: String::new(),
        size,
        kind: "archive".to_string(),
    }
}

#[tokio::test]
async fn test_fetch_releases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl/"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_json()))
        .expect(1)
        .mount(&server)
        .await;

    let releases = client(&server).fetch_releases().await.unwrap();

    assert_eq!(releases.len(), 3);
    assert_eq!(releases[0].version, "go1.23rc1");
    assert!(!releases[0].stable);
    assert_eq!(releases[1].files.len(), 2);
}

#[tokio::test]
async fn test_fetch_releases_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client(&server).fetch_releases().await;
    match result {
        Err(GoupError::Fetch(msg)) => assert!(msg.contains("503")),
        other => panic!("expected fetch error, got {:?}", other.map(|r| r.len())),
    }
}

#[tokio::test]
async fn test_fetch_releases_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = client(&server).fetch_releases().await;
    assert!(matches!(result, Err(GoupError::Json(_))));
}

#[tokio::test]
async fn test_download_streams_to_disk() {
    let server = MockServer::start().await;
    let body: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    Mock::given(method("GET"))
        .and(path(format!("/go/{}", PLATFORM_FILE)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join(PLATFORM_FILE);
    let written = client(&server)
        .download(&platform_file(body.len() as u64), &dest)
        .await
        .unwrap();

    assert_eq!(written, body.len() as u64);
    assert_eq!(fs::read(&dest).unwrap(), body);
}

#[tokio::test]
async fn test_download_size_mismatch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/go/{}", PLATFORM_FILE)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 10]))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let result = client(&server)
        .download(&platform_file(20), &temp.path().join(PLATFORM_FILE))
        .await;

    match result {
        Err(GoupError::Fetch(msg)) => assert!(msg.contains("expected 20 bytes, got 10")),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_not_found() {
    let server = MockServer::start().await;

    let temp = TempDir::new().unwrap();
    let dest = temp.path().join(PLATFORM_FILE);
    let result = client(&server).download(&platform_file(0), &dest).await;

    assert!(matches!(result, Err(GoupError::Fetch(_))));
    assert!(!dest.exists());
}
