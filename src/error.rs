//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
    #[error("invalid {var}: '{value}' is not a valid port")]
    Port { var: &'static str, value: String },
    #[error("invalid {var}: '{value}' is not a boolean")]
    Bool { var: &'static str, value: String },
    #[error("invalid {var}: '{value}' is not a socket address")]
    ListenAddr { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migrate: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The body could not be read at all (e.g. over the size limit); carries the framework status.
    #[error("request body: {message}")]
    Body { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Body { status, .. } => *status,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Missing rows are reported by status alone.
        if status == StatusCode::NOT_FOUND {
            return status.into_response();
        }
        let code = match &self {
            AppError::BadRequest(_) => "bad_request",
            AppError::Body { .. } if status == StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
            AppError::Body { .. } => "bad_request",
            _ => "database_error",
        };
        if let AppError::Db(e) = &self {
            tracing::error!(error = %e, "store operation failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
