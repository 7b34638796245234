//! Test server harness.

use issuescout::cache::ResultCacheHandle;
use issuescout::config::DEFAULT_ALLOWED_ORIGIN;
use issuescout::embedding::{Embedder, SentenceEmbedder};
use issuescout::fetch::{FetcherConfig, HttpContentFetcher};
use issuescout::gateway::{HandlerState, create_router_with_state};
use issuescout::matcher::{IssueMatcher, MatcherConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub fetch_timeout: Duration,
    pub matcher: MatcherConfig,
    pub cache_capacity: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(5),
            matcher: MatcherConfig::default(),
            cache_capacity: 1_000,
        }
    }
}

impl TestServerConfig {
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub cache: ResultCacheHandle,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns the gateway with a stub embedder, a real HTTP fetcher, and an in-memory cache.
///
/// Candidate URLs must point at a reachable server, usually a
/// [`FileServer`](super::file_server::FileServer).
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let embedder: Arc<dyn Embedder> = Arc::new(SentenceEmbedder::stub());

    let fetcher =
        HttpContentFetcher::new(FetcherConfig::default().with_timeout(config.fetch_timeout))
            .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let cache = ResultCacheHandle::with_capacity(config.cache_capacity);

    let matcher = IssueMatcher::new(embedder, fetcher, cache.clone(), config.matcher)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let state = HandlerState::new(matcher);
    let app = create_router_with_state(state, &[DEFAULT_ALLOWED_ORIGIN.to_string()]);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        cache,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
