use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::payload::ErrorResponse;
use crate::gateway::{ISSUESCOUT_STATUS_HEADER, STATUS_INVALID_REQUEST};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] JsonRejection),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            ISSUESCOUT_STATUS_HEADER,
            HeaderValue::from_static(STATUS_INVALID_REQUEST),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}

impl GatewayError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(rejection) => rejection.status(),
        }
    }
}
