//! HTTP gateway (Axum) exposing the matcher.
//!
//! This module is primarily used by the `issuescout` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use handler::{analyse_issue_handler, health_handler, root_handler};
pub use payload::AnalyzeIssueRequest;
pub use state::{HandlerState, SharedMatcher};

use crate::cache::ResultCache;
use crate::fetch::ContentFetcher;

/// Response header carrying the outcome of a request.
pub const ISSUESCOUT_STATUS_HEADER: &str = "x-issuescout-status";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const STATUS_INVALID_REQUEST: &str = "invalid_request";

pub fn create_router_with_state<F, C>(state: HandlerState<F, C>, allowed_origins: &[String]) -> Router
where
    F: ContentFetcher + 'static,
    C: ResultCache + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyse-issue", post(analyse_issue_handler::<F, C>))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the front-end origins; origins that are not valid header values are skipped.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
}
