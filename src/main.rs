//! IssueScout HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use issuescout::cache::ResultCacheHandle;
use issuescout::config::Config;
use issuescout::embedding::{Embedder, SentenceEmbedder};
use issuescout::fetch::HttpContentFetcher;
use issuescout::gateway::{HandlerState, create_router_with_state};
use issuescout::matcher::IssueMatcher;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const DEFAULT_HEALTH_CHECK_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        embed_workers = config.embed_workers,
        min_similarity = config.min_similarity,
        "IssueScout starting"
    );

    if config.model_path.is_none() {
        tracing::warn!("No ISSUESCOUT_MODEL_PATH configured, running embedder in stub mode");
    }

    // Model loading is blocking file IO plus weight mapping.
    let embedder_config = config.embedder_config();
    let embedder = tokio::task::spawn_blocking(move || SentenceEmbedder::load(embedder_config))
        .await??;
    let embedder: Arc<dyn Embedder> = Arc::new(embedder);

    let fetcher = HttpContentFetcher::new(config.fetcher_config())?;
    let cache = ResultCacheHandle::with_config(&config.cache_config());
    let matcher = IssueMatcher::new(embedder, fetcher, cache, config.matcher_config())?;

    let state = HandlerState::new(matcher);
    let app = create_router_with_state(state, &config.allowed_origins);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, origins = ?config.allowed_origins, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("IssueScout shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("ISSUESCOUT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_HEALTH_CHECK_PORT);

    let url = format!("http://127.0.0.1:{}/health", port);

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
