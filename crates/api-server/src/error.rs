//! Handler error outcomes
//!
//! Every failure is settled here and turned into an HTTP response.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// RFC 7807 problem document
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

pub fn problem(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Response {
    let body = ProblemDetails {
        kind: "about:blank",
        title: title.into(),
        status: status.as_u16(),
        detail: detail.into(),
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Core(#[from] tm_core::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        use tm_core::Error;

        match self {
            PageError::NotFound | PageError::Core(Error::TaskNotFound(_) | Error::NotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            PageError::Core(Error::Misconfigured(detail)) => {
                tracing::error!("Task store unavailable: {}", detail);
                problem(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Entity set 'Tasks' is unavailable.",
                    detail,
                )
            }
            PageError::Core(err) => {
                tracing::error!("Request failed: {}", err);
                problem(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while processing your request.",
                    err.to_string(),
                )
            }
        }
    }
}
