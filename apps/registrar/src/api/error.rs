//! # HTTP Error Responses
//!
//! Request failures that cannot be recovered inside a handler. Validation
//! problems never get here: they re-render the form with status 200.

use super::views::ErrorPage;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use registrar_core::RegistrarError;
use thiserror::Error;

/// Handler-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// 404 - the addressed student does not exist.
    #[error("{0}")]
    NotFound(String),

    /// 500 - storage or rendering failed.
    #[error("{0}")]
    Internal(String),
}

impl From<RegistrarError> for AppError {
    fn from(err: RegistrarError) -> Self {
        match err {
            RegistrarError::StudentNotFound(id) => {
                AppError::NotFound(format!("No student with id {id}."))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match self {
            AppError::NotFound(message) => {
                tracing::warn!(%message, "not found");
                (StatusCode::NOT_FOUND, "Not found", message)
            }
            AppError::Internal(detail) => {
                // Details stay in the log; the page stays generic.
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "Something went wrong while processing your request.".to_string(),
                )
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            title,
            message,
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (status, title).into_response()
            }
        }
    }
}
