//! Append-only audit trail of synchronization attempts.
//!
//! Each attempt is persisted and also emitted as a `tracing` event on the `audit` target so
//! log pipelines can forward it without querying the database.

use sea_orm::ConnectionTrait;

use crate::server::{
    data::sync_attempt::{NewSyncAttempt, SyncAttemptRepository},
    error::Error,
    model::db::{ProductModel, SyncAttemptModel},
    service::ownership::Owned,
};

pub struct AuditLog<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditLog<'a, C> {
    /// Creates a new instance of [`AuditLog`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Append one attempt.
    pub async fn record(&self, attempt: NewSyncAttempt) -> Result<SyncAttemptModel, Error> {
        let attempt = SyncAttemptRepository::new(self.db).create(attempt).await?;

        tracing::info!(
            target: "audit",
            organization_id = %attempt.organization_id,
            product_id = %attempt.product_id,
            channel_id = %attempt.channel_id,
            outcome = ?attempt.outcome,
            message = attempt.message.as_deref().unwrap_or_default(),
            timestamp = %attempt.created_at,
            "Sync attempt"
        );

        Ok(attempt)
    }

    /// Attempts for a verified product, newest first.
    pub async fn list_attempts(
        &self,
        product: &Owned<ProductModel>,
        channel_id: Option<i32>,
    ) -> Result<Vec<SyncAttemptModel>, Error> {
        let attempts = SyncAttemptRepository::new(self.db)
            .find_for_link(product.organization_id(), product.id, channel_id)
            .await?;

        Ok(attempts)
    }
}
