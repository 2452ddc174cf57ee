//! Unified error handling for the server.
//!
//! Every failure leaves a handler as an [`AppError`], which maps to a status
//! code and a `{error, code}` JSON body.
//!
//! # Design Principles
//!
//! - **Declarative**: Each error variant declares its HTTP status code
//! - **Modular**: Error type is self-contained with IntoResponse impl
//! - **SoC**: Library errors are classified here, not in handlers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reports::ReportError;
use serde_json::json;
use storage::StoreError;
use tracing::{error, warn};
use types::UnknownMetricKind;

/// Message returned for internal failures. Details only go to the log.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Application error type with HTTP response mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Referenced resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed request argument or payload (400).
    #[error("{0}")]
    InvalidArgument(String),

    /// Missing or unknown credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Store unreachable or too slow (503).
    #[error("{0}")]
    Unavailable(String),

    /// Anything unexpected (500).
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Condition name carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Unavailable(_) => "UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            AppError::Internal(detail) => {
                error!(%detail, "Request failed with internal error");
                INTERNAL_MESSAGE.to_string()
            }
            AppError::Unavailable(detail) => {
                warn!(%detail, "Store unavailable");
                detail
            }
            AppError::NotFound(msg) | AppError::InvalidArgument(msg) | AppError::Unauthorized(msg) => {
                msg
            }
        };

        let body = axum::Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::SeasonNotFound(_) | ReportError::NoSeasons => {
                AppError::NotFound(err.to_string())
            }
            ReportError::InvalidMetricKind(_) => AppError::InvalidArgument(err.to_string()),
        }
    }
}

impl From<UnknownMetricKind> for AppError {
    fn from(err: UnknownMetricKind) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidEvents(_) => AppError::InvalidArgument(err.to_string()),
            StoreError::Unavailable(_) | StoreError::Timeout { .. } => {
                AppError::Unavailable(err.to_string())
            }
            StoreError::Corrupt { .. }
            | StoreError::InvalidCollection(_)
            | StoreError::Encode(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
