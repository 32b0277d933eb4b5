//! Error types for the marketlink server.
//!
//! Domain errors live in their own modules (configuration, synchronization, channel adapters)
//! and are aggregated into [`Error`]. Every error maps to an HTTP response through
//! `IntoResponse`, and `thiserror` provides the `Display` and `Error` implementations.

pub mod adapter;
pub mod config;
pub mod retry;
pub mod sync;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{adapter::AdapterError, config::ConfigError, sync::SyncError},
};

/// Main error type for the marketlink server.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Synchronization errors (tenant resolution, ownership, throttling, adapter failures,
///   tenant isolation defects)
/// - Database errors
/// - Internal errors indicating a bug
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Synchronization error raised by the ownership gate, link registry or pipeline.
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Internal error indicating a bug in marketlink's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl From<AdapterError> for Error {
    fn from(err: AdapterError) -> Self {
        Self::SyncError(SyncError::Adapter(err))
    }
}

impl Error {
    /// Returns the synchronization error, if this is one.
    pub fn as_sync_error(&self) -> Option<&SyncError> {
        match self {
            Self::SyncError(err) => Some(err),
            _ => None,
        }
    }

    /// True when the error reports a tenant isolation defect.
    ///
    /// These always abort the surrounding operation, including whole batches.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::SyncError(SyncError::InvariantViolation(_)))
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400/401/404/409/429/502 - For synchronization errors, see [`SyncError`]
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::SyncError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The error is logged and a generic message is returned so that internal details, including
/// anything about another tenant's data, never reach the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
