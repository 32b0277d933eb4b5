use sea_orm::DbErr;

use super::{sync::SyncError, Error};

/// Whether a caller can expect a different result by retrying later.
///
/// The engine itself never retries; this classification is reported to callers (for example on
/// every failed batch row) so a scheduler can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Transient, retry with backoff
    Retry,
    /// Permanent, retrying will not help
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::SyncError(sync_error) => match sync_error {
                // Throttled before anything reached the channel
                SyncError::RateLimited(_) => ErrorRetryStrategy::Retry,

                // Channel timeouts, transport failures and 5xx responses
                SyncError::Adapter(adapter_error) if adapter_error.is_transient() => {
                    ErrorRetryStrategy::Retry
                }
                SyncError::Adapter(_) => ErrorRetryStrategy::Fail,

                // Ownership and input errors never resolve on their own
                SyncError::Unauthorized
                | SyncError::NotFound(_)
                | SyncError::ChannelInactive(_)
                | SyncError::InvalidValue(_)
                | SyncError::InvalidRow(_) => ErrorRetryStrategy::Fail,

                // Tenant isolation defect, needs a fix not a retry
                SyncError::InvariantViolation(_) => ErrorRetryStrategy::Fail,
            },

            Self::DbErr(db_err) => match db_err {
                // Connection errors - transient, should retry
                DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Query, constraint and conversion errors are permanent
                _ => ErrorRetryStrategy::Fail,
            },

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
