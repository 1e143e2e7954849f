//! SIWE Error Types
//!
//! This module provides SIWE-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// SIWE-specific result type alias
pub type SiweResult<T> = Result<T, SiweError>;

/// SIWE-specific error variants
///
/// Every failure is a definitive rejection of that verification attempt;
/// nothing here is retried internally. Each variant is independently
/// observable so the gateway can log the specific cause, and maps to an
/// HTTP status without leaking detail beyond the error kind.
#[derive(Debug, Error)]
pub enum SiweError {
    /// Malformed construction parameters (caller error)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Untrusted message text failed structural validation
    #[error("malformed message: {field} field")]
    MalformedMessage { field: &'static str },

    /// No challenge is pending for this session (never issued, already
    /// consumed, or expired out of the store)
    #[error("no pending sign-in challenge for this session")]
    NoPendingChallenge,

    /// Submitted nonce does not match the issued challenge
    #[error("nonce does not match the pending challenge")]
    NonceMismatch,

    /// Message domain does not match this server's domain
    #[error("message domain does not match this server")]
    DomainMismatch,

    /// Message carries a not-before instant in the future
    #[error("message is not yet valid")]
    NotYetValid,

    /// Message expiration time has passed
    #[error("message has expired")]
    Expired,

    /// Signature undecodable, unrecoverable, or recovered address does
    /// not match the declared account
    #[error("signature verification failed: {0}")]
    InvalidSignature(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl SiweError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiweError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SiweError::MalformedMessage { .. } => StatusCode::BAD_REQUEST,
            SiweError::NoPendingChallenge | SiweError::Expired => StatusCode::GONE,
            SiweError::NonceMismatch
            | SiweError::DomainMismatch
            | SiweError::NotYetValid
            | SiweError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            SiweError::Database(_) | SiweError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SiweError::InvalidInput(_) => ErrorKind::UnprocessableEntity,
            SiweError::MalformedMessage { .. } => ErrorKind::BadRequest,
            SiweError::NoPendingChallenge | SiweError::Expired => ErrorKind::Gone,
            SiweError::NonceMismatch
            | SiweError::DomainMismatch
            | SiweError::NotYetValid
            | SiweError::InvalidSignature(_) => ErrorKind::Unauthorized,
            SiweError::Database(_) | SiweError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SiweError::Database(e) => {
                tracing::error!(error = %e, "SIWE database error");
            }
            SiweError::Internal(msg) => {
                tracing::error!(message = %msg, "SIWE internal error");
            }
            SiweError::InvalidSignature(reason) => {
                tracing::warn!(reason = %reason, "SIWE signature rejected");
            }
            SiweError::NonceMismatch | SiweError::DomainMismatch => {
                tracing::warn!(error = %self, "SIWE verification rejected");
            }
            _ => {
                tracing::debug!(error = %self, "SIWE error");
            }
        }
    }
}

impl From<SiweError> for AppError {
    fn from(err: SiweError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for SiweError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Return empty body for security (don't leak details)
        (status, ()).into_response()
    }
}

impl From<platform::crypto::RecoverError> for SiweError {
    fn from(err: platform::crypto::RecoverError) -> Self {
        SiweError::InvalidSignature(err.to_string())
    }
}
