//! Shared fixtures for the HTTP and store integration tests.

#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use http_body_util::BodyExt;
use smorfia::config::UpstreamConfig;
use smorfia::models::{DrawnNumberBatch, MeaningEntry};
use smorfia::source::NumberSource;
use smorfia::store::{InMemoryMeaningStore, MeaningStore};
use smorfia::{Result, SmorfiaError};
use tokio::net::TcpListener;
use url::Url;

// ── Upstream stubs ─────────────────────────────────────────────

/// Serve `router` on an ephemeral local port.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// A local address nothing listens on.
pub async fn dead_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn upstream_config(addr: SocketAddr, timeout: Duration) -> UpstreamConfig {
    UpstreamConfig::new(
        Url::parse(&format!("http://{addr}")).unwrap(),
        timeout,
    )
}

/// Upstream that answers every draw with a different single number and
/// counts how often it was asked.
pub fn counting_upstream(hits: Arc<AtomicUsize>) -> Router {
    async fn draw(State(hits): State<Arc<AtomicUsize>>) -> Json<serde_json::Value> {
        let n = hits.fetch_add(1, Ordering::SeqCst);
        Json(serde_json::json!({ "numbers": [(n % 90) + 1] }))
    }
    Router::new()
        .route("/api/v1/random", get(draw))
        .with_state(hits)
}

/// Upstream that always answers with `status`.
pub fn failing_upstream(status: StatusCode) -> Router {
    Router::new().route(
        "/api/v1/random",
        get(move || async move { (status, "backend exploded") }),
    )
}

/// Upstream that always answers 200 with `body`.
pub fn fixed_body_upstream(body: &'static str) -> Router {
    Router::new().route("/api/v1/random", get(move || async move { body }))
}

// ── In-process NumberSource / MeaningStore doubles ─────────────

/// Returns the same batch every time and counts calls.
pub struct FixedSource {
    pub batch: Vec<i64>,
    pub calls: AtomicUsize,
}

impl FixedSource {
    pub fn new(batch: Vec<i64>) -> Self {
        Self {
            batch,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NumberSource for FixedSource {
    async fn fetch_batch(&self) -> Result<DrawnNumberBatch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(DrawnNumberBatch::new(self.batch.clone()))
    }
}

/// Fails every fetch as if the upstream refused the connection.
#[derive(Default)]
pub struct UnreachableSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl NumberSource for UnreachableSource {
    async fn fetch_batch(&self) -> Result<DrawnNumberBatch> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SmorfiaError::UpstreamUnreachable(
            "tcp connect error: Connection refused (os error 111)".into(),
        ))
    }
}

/// Store whose medium is gone; counts how often it was asked.
#[derive(Default)]
pub struct UnavailableStore {
    pub loads: AtomicUsize,
}

#[async_trait]
impl MeaningStore for UnavailableStore {
    async fn load(&self) -> Result<Vec<MeaningEntry>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Err(SmorfiaError::StoreUnavailable("database is locked".into()))
    }

    async fn reseed(&self, _entries: Vec<MeaningEntry>) -> Result<()> {
        Err(SmorfiaError::StoreUnavailable("database is locked".into()))
    }

    fn backend(&self) -> &'static str {
        "unavailable"
    }
}

/// Healthy in-memory store that counts loads.
pub struct CountingStore {
    pub inner: InMemoryMeaningStore,
    pub loads: AtomicUsize,
}

impl CountingStore {
    pub fn new(entries: Vec<MeaningEntry>) -> Self {
        Self {
            inner: InMemoryMeaningStore::with_entries(entries).unwrap(),
            loads: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MeaningStore for CountingStore {
    async fn load(&self) -> Result<Vec<MeaningEntry>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load().await
    }

    async fn reseed(&self, entries: Vec<MeaningEntry>) -> Result<()> {
        self.inner.reseed(entries).await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}

// ── Log capture ────────────────────────────────────────────────

/// Collects formatted log lines written while the guard from
/// [`capture_logs`] is alive on the current thread.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines mentioning `needle`.
    pub fn lines_with(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route DEBUG and above on this thread into a fresh buffer. Works with the
/// default current-thread `#[tokio::test]` runtime.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

// ── Fixtures ───────────────────────────────────────────────────

pub fn two_row_table() -> Vec<MeaningEntry> {
    vec![
        MeaningEntry::new(1, "L'Italia"),
        MeaningEntry::new(2, "'A piezzo"),
    ]
}

pub fn labelled_table(label: &str, upto: i64) -> Vec<MeaningEntry> {
    (1..=upto)
        .map(|n| MeaningEntry::new(n, format!("{label} {n}")))
        .collect()
}

// ── Response helpers ───────────────────────────────────────────

pub async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

pub fn assert_no_store_headers(resp: &axum::response::Response) {
    let headers = resp.headers();
    assert_eq!(
        headers["cache-control"],
        "no-store, no-cache, must-revalidate, proxy-revalidate"
    );
    assert_eq!(headers["pragma"], "no-cache");
    assert_eq!(headers["expires"], "0");
}
