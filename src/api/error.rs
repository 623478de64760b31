//! Request-level errors that carry no endpoint-specific body.
//!
//! Each variant maps to one HTTP status and renders as [`ErrorBody`] JSON.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::ALLOW},
    response::{IntoResponse, Response},
};

use super::types::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body could not be decoded; carries the decoder's message.
    #[error("{0}")]
    BadRequest(String),
    /// Carries the methods the path does accept, sent back as `Allow`.
    #[error("Method not allowed")]
    MethodNotAllowed { allow: &'static str },
    #[error("Not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };
        let mut response = (self.status_code(), Json(body)).into_response();
        if let ApiError::MethodNotAllowed { allow } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
