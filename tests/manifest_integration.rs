//! Integration tests for manifest loading.
//!
//! These tests verify the fetch path against mock HTTP servers and local
//! site directories.

use catalog_core::manifest::{
    FileManifestSource, HttpManifestSource, ManifestError, ManifestSource, load,
};
use tempfile::TempDir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to serve a manifest body at `/datasets.json`.
async fn serve_manifest(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasets.json"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("Content-Type", "application/json")
                .set_body_string(body.to_string()),
        )
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_load_http_manifest_returns_records_in_order() {
    let mock_server = serve_manifest(
        200,
        r#"[{"slug":"b","title":"Beta"},{"slug":"a","title":"Alpha","tags":["x"]}]"#,
    )
    .await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let datasets = load(&source).await.unwrap();

    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].title.as_deref(), Some("Beta"));
    assert_eq!(datasets[1].tags(), ["x"]);
}

#[tokio::test]
async fn test_load_http_404_is_status_error() {
    let mock_server = serve_manifest(404, "not found").await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let err = load(&source).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_format_error());
    assert!(err.to_string().contains("404"), "{err}");
}

#[tokio::test]
async fn test_load_http_500_is_status_error() {
    let mock_server = serve_manifest(500, "").await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let err = load(&source).await.unwrap_err();

    assert!(matches!(err, ManifestError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_load_http_object_body_is_format_error() {
    let mock_server = serve_manifest(200, r#"{"not":"an array"}"#).await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let err = load(&source).await.unwrap_err();

    assert!(err.is_format_error());
    assert!(matches!(err, ManifestError::NotArray { found: "object" }));
}

#[tokio::test]
async fn test_load_http_null_body_is_format_error() {
    let mock_server = serve_manifest(200, "null").await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let err = load(&source).await.unwrap_err();

    assert!(matches!(err, ManifestError::NotArray { found: "null" }));
}

#[tokio::test]
async fn test_load_http_sends_cache_bypass_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/datasets.json"))
        .and(header_exists("cache-control"))
        .and(header_exists("pragma"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = HttpManifestSource::from_site(&mock_server.uri()).unwrap();
    let datasets = load(&source).await.unwrap();

    assert!(datasets.is_empty());
}

#[tokio::test]
async fn test_load_http_connection_refused_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let source = HttpManifestSource::from_site(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = load(&source).await.unwrap_err();

    assert!(
        matches!(
            err,
            ManifestError::Network { .. } | ManifestError::Timeout { .. }
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_load_local_site_directory() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("datasets.json"),
        r#"[{"slug":"local","r2_path":"viewers/local.html"}]"#,
    )
    .unwrap();

    let source = FileManifestSource::new(temp.path(), "datasets.json");
    let datasets = load(&source).await.unwrap();

    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[0].r2_path.as_deref(), Some("viewers/local.html"));
}

#[tokio::test]
async fn test_load_missing_local_manifest_is_io_error() {
    let temp = TempDir::new().unwrap();

    let source = FileManifestSource::new(temp.path(), "datasets.json");
    let err = load(&source).await.unwrap_err();

    assert!(matches!(err, ManifestError::Io { .. }));
    assert!(err.to_string().contains("datasets.json"));
    assert!(source.location().ends_with("datasets.json"));
}
