use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::cache::ResultCache;
use crate::fetch::ContentFetcher;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{AnalyzeIssueRequest, HealthResponse, WelcomeResponse};
use crate::gateway::state::HandlerState;
use crate::gateway::{ISSUESCOUT_STATUS_HEADER, STATUS_ERROR, STATUS_SUCCESS};
use crate::model::MatchResult;

pub const WELCOME_MESSAGE: &str = "Welcome to IssueScout API!";
pub const HEALTH_MESSAGE: &str = "Server is running!";

#[instrument]
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

#[instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_MESSAGE,
    })
}

/// Ranks the request's files against its issue.
///
/// A success result is 200; an error result keeps the same JSON shape with 422.
#[instrument(
    skip(state, request),
    fields(owner = tracing::field::Empty, repo = tracing::field::Empty)
)]
pub async fn analyse_issue_handler<F, C>(
    State(state): State<HandlerState<F, C>>,
    request: Result<Json<AnalyzeIssueRequest>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    F: ContentFetcher + 'static,
    C: ResultCache + 'static,
{
    let Json(request) = request?;

    let span = tracing::Span::current();
    span.record("owner", tracing::field::display(&request.owner));
    span.record("repo", tracing::field::display(&request.repo));

    debug!(
        files = request.filtered_files.len(),
        labels = request.issue_details.labels.len(),
        "Analysing issue"
    );

    let result = state
        .matcher
        .match_files(&request.issue_details, &request.filtered_files)
        .await;

    Ok(make_response(result))
}

pub(crate) fn make_response(result: MatchResult) -> Response {
    let (status, label) = if result.is_success() {
        (StatusCode::OK, STATUS_SUCCESS)
    } else {
        (StatusCode::UNPROCESSABLE_ENTITY, STATUS_ERROR)
    };

    let mut headers = HeaderMap::new();
    headers.insert(ISSUESCOUT_STATUS_HEADER, HeaderValue::from_static(label));

    (status, headers, Json(result)).into_response()
}
