//! Shared plumbing for the HTML interface

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::shared::types::errors::DomainError;

/// Error type returned by page handlers. Converts domain failures into
/// minimal HTML error responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Domain(DomainError::NotFound { entity, field, value }) => (
                StatusCode::NOT_FOUND,
                format!("{} with {} '{}' was not found", entity, field, value),
            ),
            AppError::Domain(DomainError::Validation(msg))
            | AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Domain(DomainError::Storage(msg)) => {
                error!(error = %msg, "Storage failure while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Render(e) => {
                error!(error = %e, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = format!(
            "<!DOCTYPE html><html><head><title>{status}</title></head>\
             <body><h1>{status}</h1><p>{message}</p>\
             <p><a href=\"/admin/users\">Back to user list</a></p></body></html>",
            status = status,
            message = message,
        );
        (status, Html(body)).into_response()
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
