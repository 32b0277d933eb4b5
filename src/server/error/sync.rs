//! Synchronization error taxonomy.
//!
//! Covers tenant resolution, ownership verification, throttling, channel adapter failures and
//! tenant isolation defects.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{adapter::AdapterError, InternalServerError},
};

/// Kind of record an ownership lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    Channel,
    Link,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => f.write_str("Product"),
            Self::Channel => f.write_str("Channel"),
            Self::Link => f.write_str("Listing link"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SyncError {
    /// The request carries no resolvable organization.
    #[error("Organization context required")]
    Unauthorized,
    /// The record does not exist for the caller's organization.
    ///
    /// Deliberately carries no detail that would tell a missing record apart from one owned by
    /// another organization.
    #[error("{0} not found")]
    NotFound(Resource),
    /// The channel account is disabled; nothing is pushed to it.
    #[error("Channel {0} is inactive")]
    ChannelInactive(i32),
    /// The per-channel limiter denied the call. Safe to retry after backing off.
    #[error("Channel {0} is rate limited, retry later")]
    RateLimited(i32),
    /// The external channel rejected or failed the update.
    #[error("Channel rejected the update: {0}")]
    Adapter(AdapterError),
    /// A listing link's organization disagrees with its product's or channel's organization.
    #[error("Tenant isolation violated: {0}")]
    InvariantViolation(String),
    /// A price or stock value no channel accepts.
    #[error("Invalid listing value: {0}")]
    InvalidValue(String),
    /// A bulk input row without a resolvable code or price.
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl SyncError {
    fn response(status: StatusCode, message: String) -> Response {
        (status, Json(ErrorDto { error: message })).into_response()
    }
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => Self::response(StatusCode::UNAUTHORIZED, self.to_string()),
            Self::NotFound(_) => Self::response(StatusCode::NOT_FOUND, self.to_string()),
            Self::ChannelInactive(_) => Self::response(StatusCode::CONFLICT, self.to_string()),
            Self::RateLimited(channel_id) => {
                tracing::debug!(channel_id = %channel_id, "{}", self);

                Self::response(StatusCode::TOO_MANY_REQUESTS, self.to_string())
            }
            Self::Adapter(_) => Self::response(StatusCode::BAD_GATEWAY, self.to_string()),
            Self::InvalidValue(_) | Self::InvalidRow(_) => {
                Self::response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::InvariantViolation(_) => InternalServerError(self).into_response(),
        }
    }
}
