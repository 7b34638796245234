//! Local HTTP server standing in for a raw-content host.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use issuescout::model::CandidateFile;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
enum FileRoute {
    Body(String),
    Status(StatusCode),
    Slow(Duration, String),
}

#[derive(Default)]
struct ServerState {
    routes: HashMap<String, FileRoute>,
    hits: AtomicUsize,
}

#[derive(Default)]
pub struct FileServerBuilder {
    routes: HashMap<String, FileRoute>,
}

impl FileServerBuilder {
    pub fn file(mut self, path: &str, body: &str) -> Self {
        self.routes
            .insert(path.to_string(), FileRoute::Body(body.to_string()));
        self
    }

    pub fn status(mut self, path: &str, status: StatusCode) -> Self {
        self.routes
            .insert(path.to_string(), FileRoute::Status(status));
        self
    }

    pub fn slow(mut self, path: &str, delay: Duration, body: &str) -> Self {
        self.routes
            .insert(path.to_string(), FileRoute::Slow(delay, body.to_string()));
        self
    }

    pub async fn start(self) -> FileServer {
        let state = Arc::new(ServerState {
            routes: self.routes,
            hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/files/{*path}", get(serve_file))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind file server");
        let addr = listener.local_addr().expect("File server has no address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        FileServer {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

async fn serve_file(State(state): State<Arc<ServerState>>, Path(path): Path<String>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.routes.get(&path).cloned() {
        Some(FileRoute::Body(body)) => body.into_response(),
        Some(FileRoute::Status(status)) => status.into_response(),
        Some(FileRoute::Slow(delay, body)) => {
            tokio::time::sleep(delay).await;
            body.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub struct FileServer {
    pub addr: SocketAddr,
    state: Arc<ServerState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FileServer {
    pub fn builder() -> FileServerBuilder {
        FileServerBuilder::default()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}/files/{}", self.addr, path)
    }

    /// Candidate whose `download_url` points at this server.
    pub fn candidate(&self, path: &str) -> CandidateFile {
        let name = path.rsplit('/').next().unwrap_or(path);
        CandidateFile::new(name, path, self.url(path))
    }

    pub fn candidates(&self, paths: &[&str]) -> Vec<CandidateFile> {
        paths.iter().map(|p| self.candidate(p)).collect()
    }

    /// Requests served so far, including failures.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for FileServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
