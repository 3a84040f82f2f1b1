//! Unified error handling
//!
//! Application-wide error type; converts into an HTML error page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::db::cafes::StoreError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("template error: {0}")]
    Template(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Cafe {id} does not exist.")),
            StoreError::DuplicateName => {
                AppError::Conflict("A cafe with that name is already listed.".into())
            }
            StoreError::Db(e) => AppError::Database(e.to_string()),
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "Something went wrong on our side.".into(),
                )
            }
            AppError::Template(msg) => {
                error!(target: "views", error = %msg, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error",
                    "Something went wrong on our side.".into(),
                )
            }
        };

        // Error page messages never contain user-supplied text, so plain
        // formatting is safe here.
        let body = format!(
            "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">Back to all cafes</a></p>\n</body>\n</html>\n"
        );
        (status, Html(body)).into_response()
    }
}
