//! Integration tests for snapshot loading
//!
//! File and HTTP sources, fallback to the built-in document, cache lifetime

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use sentinel::core::{FetchError, SnapshotCache, SnapshotLoader, SnapshotSource};
use sentinel::types::Snapshot;
use tempfile::NamedTempFile;

const TIMEOUT: Duration = Duration::from_millis(1000);

fn producer_document(pressure: i64) -> String {
    let mut snapshot = Snapshot::builtin();
    snapshot.bubble_pressure = pressure;
    snapshot.last_updated = "2025-01-04T08:30:00Z".parse().unwrap();
    serde_json::to_string(&snapshot).unwrap()
}

fn write_temp(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn file_loader(file: &NamedTempFile) -> SnapshotLoader {
    SnapshotLoader::new(SnapshotSource::File(file.path().to_path_buf()), TIMEOUT)
}

/// Serve `router` on an ephemeral port, return its base URL
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Clone)]
struct Producer {
    hits: Arc<AtomicUsize>,
    status: StatusCode,
    body: String,
    delay: Duration,
}

async fn produce(State(p): State<Producer>) -> (StatusCode, String) {
    p.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(p.delay).await;
    (p.status, p.body.clone())
}

async fn spawn_producer(status: StatusCode, body: String, delay: Duration) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let producer = Producer { hits: Arc::clone(&hits), status, body, delay };
    let base = spawn(Router::new().route("/website-data.json", get(produce)).with_state(producer)).await;
    (format!("{}/website-data.json", base), hits)
}

#[tokio::test]
async fn test_file_source_loads_document() {
    let file = write_temp(&producer_document(61));
    let snapshot = file_loader(&file).load(&SnapshotCache::new()).await;
    assert_eq!(snapshot.bubble_pressure, 61);
    assert_eq!(snapshot.last_updated.to_rfc3339(), "2025-01-04T08:30:00+00:00");
}

#[tokio::test]
async fn test_offsetless_timestamp_is_not_a_fallback() {
    let mut doc: serde_json::Value = serde_json::from_str(&producer_document(61)).unwrap();
    doc["lastUpdated"] = "2025-01-04T15:30:00".into();
    let file = write_temp(&doc.to_string());
    let loader = file_loader(&file);

    let strict = loader.fetch_strict().await.unwrap();
    assert_eq!(strict.last_updated.to_rfc3339(), "2025-01-04T15:30:00+00:00");

    let snapshot = loader.load(&SnapshotCache::new()).await;
    assert_eq!(snapshot.bubble_pressure, 61);
}

#[tokio::test]
async fn test_malformed_file_falls_back() {
    let file = write_temp("{\"lastUpdated\": 12");
    let loader = file_loader(&file);
    let snapshot = loader.load(&SnapshotCache::new()).await;
    assert_eq!(snapshot.bubble_pressure, 52);
    assert_eq!(snapshot.assets.len(), 6);
    assert!(matches!(loader.fetch_strict().await, Err(FetchError::Parse(_))));
}

#[tokio::test]
async fn test_cached_until_invalidated() {
    let file = write_temp(&producer_document(61));
    let loader = file_loader(&file);
    let cache = SnapshotCache::new();

    assert_eq!(loader.load(&cache).await.bubble_pressure, 61);

    std::fs::write(file.path(), producer_document(74)).unwrap();
    assert_eq!(loader.load(&cache).await.bubble_pressure, 61, "second load must not re-read");

    cache.invalidate().await;
    assert_eq!(loader.load(&cache).await.bubble_pressure, 74);
}

#[tokio::test]
async fn test_fallback_is_cached_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("website-data.json");
    let loader = SnapshotLoader::new(SnapshotSource::File(path.clone()), TIMEOUT);
    let cache = SnapshotCache::new();

    let first = loader.load(&cache).await;
    assert_eq!(first.bubble_pressure, 52);

    std::fs::write(&path, producer_document(88)).unwrap();
    let second = loader.load(&cache).await;
    assert!(Arc::ptr_eq(&first, &second));

    cache.invalidate().await;
    assert_eq!(loader.load(&cache).await.bubble_pressure, 88);
}

#[tokio::test]
async fn test_http_source_loads_document() {
    let (url, hits) = spawn_producer(StatusCode::OK, producer_document(45), Duration::ZERO).await;
    let loader = SnapshotLoader::new(SnapshotSource::parse(&url), TIMEOUT);
    let cache = SnapshotCache::new();

    assert_eq!(loader.load(&cache).await.bubble_pressure, 45);
    assert_eq!(loader.load(&cache).await.bubble_pressure, 45);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_http_error_status_falls_back() {
    let (url, _) = spawn_producer(
        StatusCode::INTERNAL_SERVER_ERROR,
        producer_document(45),
        Duration::ZERO,
    )
    .await;
    let loader = SnapshotLoader::new(SnapshotSource::parse(&url), TIMEOUT);

    assert_eq!(loader.load(&SnapshotCache::new()).await.bubble_pressure, 52);
    assert!(matches!(loader.fetch_strict().await, Err(FetchError::Status(500))));
}

#[tokio::test]
async fn test_http_timeout_falls_back() {
    let (url, _) = spawn_producer(StatusCode::OK, producer_document(45), Duration::from_secs(2)).await;
    let loader = SnapshotLoader::new(SnapshotSource::parse(&url), Duration::from_millis(100));

    assert_eq!(loader.load(&SnapshotCache::new()).await.bubble_pressure, 52);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_load_fetches_once() {
    let (url, hits) = spawn_producer(StatusCode::OK, producer_document(58), Duration::from_millis(100)).await;
    let loader = Arc::new(SnapshotLoader::new(SnapshotSource::parse(&url), TIMEOUT));
    let cache = Arc::new(SnapshotCache::new());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let loader = Arc::clone(&loader);
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { loader.load(&cache).await.bubble_pressure })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 58);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
