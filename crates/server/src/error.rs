//! HTTP error mapping.
//!
//! Every handler error funnels through [`AppError`], which owns the mapping
//! onto status codes and the JSON failure envelope. Server-side failures are
//! reported to Sentry and logged; their response bodies carry a generic
//! message so internals never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::db::RepositoryError;
use crate::services::{AuthError, CatalogError, CheckoutError, UploadError};

/// Application-level error for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client input failed validation (400).
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule was violated (400).
    #[error("{0}")]
    Conflict(String),

    /// The request references entities that do not exist (400).
    #[error("{0}")]
    InvalidReference(String),

    /// A request with the same id is already being processed (400).
    #[error("duplicate request")]
    DuplicateRequest,

    /// Authentication failed (401).
    #[error("invalid credentials")]
    Unauthorized,

    /// The caller lacks the required role (403).
    #[error("admin access required")]
    Forbidden,

    /// The target resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// Database failure (500).
    #[error("database error: {0}")]
    Database(RepositoryError),

    /// Any other server-side failure (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Conflict(_)
            | Self::InvalidReference(_)
            | Self::DuplicateRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message clients see. Server-side failures all collapse onto one
    /// generic string.
    fn client_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            sentry::capture_error(&self);
        }

        let body = Json(json!({
            "success": false,
            "message": self.client_message(),
        }));

        (status, body).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Database(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidEmail(_) | AuthError::InvalidRole(_) => {
                Self::Validation(e.to_string())
            }
            AuthError::EmailTaken => Self::Conflict(e.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::RoleMismatch => Self::Forbidden,
            AuthError::Repository(repo) => repo.into(),
            AuthError::PasswordHash => Self::Internal(e.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::MissingField(_)
            | CatalogError::InvalidPrice
            | CatalogError::NegativePrice => Self::Validation(e.to_string()),
            CatalogError::DuplicateTitle => Self::Conflict(e.to_string()),
            CatalogError::NotFound => Self::NotFound,
            CatalogError::Repository(repo) => Self::Database(repo),
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::EmptyCart
            | CheckoutError::MissingTotal
            | CheckoutError::MissingPaymentMethod
            | CheckoutError::UnknownPaymentMethod(_)
            | CheckoutError::InvalidQuantity
            | CheckoutError::NegativePrice => Self::Validation(e.to_string()),
            CheckoutError::UnknownGames(_) => Self::InvalidReference(e.to_string()),
            CheckoutError::Transaction(repo) => Self::Database(repo),
        }
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Empty | UploadError::TooLarge { .. } => Self::Validation(e.to_string()),
            UploadError::Io(io) => Self::Internal(io.to_string()),
        }
    }
}
