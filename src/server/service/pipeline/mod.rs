//! Synchronization pipeline.
//!
//! Single-item and bulk updates share one path per (product, channel):
//!
//! 1. Ownership gate: the product and channel must belong to the caller's organization
//! 2. Invalid values and inactive channels are refused before any token is spent
//! 3. Rate limiter: one token per channel call; a denial is audited and leaves the link as is
//! 4. Channel adapter call, bounded by the adapter timeout
//! 5. Link registry upsert with the confirmed state or the failure, and the audit log entry,
//!    on one transaction. If storing fails the attempt is still recorded.
//!
//! The pipeline never retries. Callers receive the error and its
//! [`ErrorRetryStrategy`](crate::server::error::retry::ErrorRetryStrategy).

pub mod batch;

use std::collections::HashMap;

use entity::{listing_link::SyncStatus, sync_attempt::SyncOutcome};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    channel::AdapterRegistry,
    data::{listing_link::LinkUpdate, sync_attempt::NewSyncAttempt},
    error::{sync::SyncError, Error},
    model::db::{ChannelModel, ListingLinkModel, ProductModel, SyncAttemptModel},
    rate_limit::{channel_key, RateLimiter},
    service::{
        audit::AuditLog,
        ownership::{Owned, OwnershipGate},
        registry::LinkRegistry,
    },
};

use self::batch::{BatchOutcome, BatchRow};

pub struct SyncPipeline<'a> {
    db: &'a DatabaseConnection,
    limiter: &'a dyn RateLimiter,
    adapters: &'a AdapterRegistry,
}

impl<'a> SyncPipeline<'a> {
    /// Creates a new instance of [`SyncPipeline`]
    pub fn new(
        db: &'a DatabaseConnection,
        limiter: &'a dyn RateLimiter,
        adapters: &'a AdapterRegistry,
    ) -> Self {
        Self {
            db,
            limiter,
            adapters,
        }
    }

    /// Push a new price for a product to one channel.
    ///
    /// Equivalent to [`Self::push_listing`] without a stock value.
    pub async fn push_price(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
        price: f64,
    ) -> Result<ListingLinkModel, Error> {
        self.push_listing(organization_id, product_id, channel_id, price, None)
            .await
    }

    /// Push a price, and optionally stock, for a product to one channel.
    ///
    /// # Returns
    /// - `Ok(ListingLinkModel)` - The channel confirmed the update; the link is `active`
    /// - `Err(SyncError::NotFound)` - Product or channel not owned by the organization
    /// - `Err(SyncError::InvalidValue)` - Negative or non-finite price, or negative stock
    /// - `Err(SyncError::ChannelInactive)` - Channel disabled, nothing was sent
    /// - `Err(SyncError::RateLimited)` - Throttled, the link is unchanged
    /// - `Err(SyncError::Adapter)` - The channel failed the call; the link records the error
    /// - `Err(SyncError::InvariantViolation)` - Tenant isolation defect detected
    pub async fn push_listing(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
        price: f64,
        stock: Option<i32>,
    ) -> Result<ListingLinkModel, Error> {
        let gate = OwnershipGate::new(self.db);
        let product = gate.verify_product(organization_id, product_id).await?;
        let channel = gate.verify_channel(organization_id, channel_id).await?;

        self.push_owned(&product, &channel, price, stock).await
    }

    /// Push spreadsheet-style records to every channel in `channel_ids`.
    ///
    /// Records that do not yield a code and a price are reported as failures and never pushed.
    /// See [`Self::push_batch`] for the failure semantics.
    pub async fn push_records(
        &self,
        organization_id: i32,
        channel_ids: &[i32],
        records: &[HashMap<String, String>],
    ) -> Result<BatchOutcome, Error> {
        let mut outcome = BatchOutcome::default();
        let mut rows = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            match BatchRow::from_record(record) {
                Ok(row) => rows.push((index, row)),
                Err(err) => outcome.fail(Some(index), None, None, err.into())?,
            }
        }

        self.run_batch(organization_id, channel_ids, rows, outcome)
            .await
    }

    /// Push parsed rows to every channel in `channel_ids`.
    ///
    /// Rows are processed one at a time so the per-channel limiter is observed. A failing row
    /// never aborts its siblings: product lookups, throttling and adapter errors are collected
    /// into the returned [`BatchOutcome`]. Unknown channels are reported once and skipped.
    ///
    /// # Returns
    /// - `Ok(BatchOutcome)` - Successful push count and per-row failures
    /// - `Err(SyncError::InvariantViolation)` - Tenant isolation defect; the batch is aborted
    pub async fn push_batch(
        &self,
        organization_id: i32,
        channel_ids: &[i32],
        rows: &[BatchRow],
    ) -> Result<BatchOutcome, Error> {
        let rows = rows.iter().cloned().enumerate().collect();

        self.run_batch(organization_id, channel_ids, rows, BatchOutcome::default())
            .await
    }

    async fn run_batch(
        &self,
        organization_id: i32,
        channel_ids: &[i32],
        rows: Vec<(usize, BatchRow)>,
        mut outcome: BatchOutcome,
    ) -> Result<BatchOutcome, Error> {
        let gate = OwnershipGate::new(self.db);

        let mut seen = Vec::with_capacity(channel_ids.len());
        let mut channels: Vec<Owned<ChannelModel>> = Vec::with_capacity(channel_ids.len());
        for &channel_id in channel_ids {
            if seen.contains(&channel_id) {
                continue;
            }
            seen.push(channel_id);

            match gate.verify_channel(organization_id, channel_id).await {
                Ok(channel) => channels.push(channel),
                Err(err) => outcome.fail(None, None, Some(channel_id), err)?,
            }
        }

        for (index, row) in rows {
            let product = match gate.resolve_product_by_code(organization_id, &row.code).await {
                Ok(product) => product,
                Err(err) => {
                    outcome.fail(Some(index), Some(&row.code), None, err)?;
                    continue;
                }
            };

            for channel in &channels {
                match self
                    .push_owned(&product, channel, row.price, row.stock)
                    .await
                {
                    Ok(_) => outcome.succeeded += 1,
                    Err(err) => {
                        outcome.fail(Some(index), Some(&row.code), Some(channel.id), err)?
                    }
                }
            }
        }

        tracing::info!(
            organization_id = %organization_id,
            succeeded = outcome.succeeded,
            failed = outcome.failures.len(),
            "Batch synchronization finished"
        );

        Ok(outcome)
    }

    /// Get the link between a product and a channel of the organization.
    pub async fn find_link(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
    ) -> Result<Option<ListingLinkModel>, Error> {
        let gate = OwnershipGate::new(self.db);
        let product = gate.verify_product(organization_id, product_id).await?;
        let channel = gate.verify_channel(organization_id, channel_id).await?;

        LinkRegistry::new(self.db).find_link(&product, &channel).await
    }

    /// Get every link of an organization's product.
    pub async fn list_links_for_product(
        &self,
        organization_id: i32,
        product_id: i32,
    ) -> Result<Vec<ListingLinkModel>, Error> {
        let product = OwnershipGate::new(self.db)
            .verify_product(organization_id, product_id)
            .await?;

        LinkRegistry::new(self.db)
            .list_links_for_product(&product)
            .await
    }

    /// Get the recorded attempts for an organization's product, newest first.
    pub async fn list_attempts(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: Option<i32>,
    ) -> Result<Vec<SyncAttemptModel>, Error> {
        let product = OwnershipGate::new(self.db)
            .verify_product(organization_id, product_id)
            .await?;

        AuditLog::new(self.db)
            .list_attempts(&product, channel_id)
            .await
    }

    /// Clear the remote listing id of a link and mark it inactive.
    pub async fn delink(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
    ) -> Result<ListingLinkModel, Error> {
        let gate = OwnershipGate::new(self.db);
        let product = gate.verify_product(organization_id, product_id).await?;
        let channel = gate.verify_channel(organization_id, channel_id).await?;

        LinkRegistry::new(self.db).delink(&product, &channel).await
    }

    /// Disable an organization's channel and mark every link on it inactive.
    ///
    /// Later pushes to the channel fail with [`SyncError::ChannelInactive`] without calling the
    /// adapter.
    pub async fn deactivate_channel(
        &self,
        organization_id: i32,
        channel_id: i32,
    ) -> Result<u64, Error> {
        let channel = OwnershipGate::new(self.db)
            .verify_channel(organization_id, channel_id)
            .await?;

        let txn = self.db.begin().await?;
        let deactivated = LinkRegistry::new(&txn).deactivate_channel(&channel).await?;
        txn.commit().await?;

        Ok(deactivated)
    }

    async fn push_owned(
        &self,
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<ListingLinkModel, Error> {
        let attempt = |outcome: SyncOutcome, message: Option<String>| NewSyncAttempt {
            organization_id: product.organization_id(),
            product_id: product.id,
            channel_id: channel.id,
            requested_price: Some(price),
            requested_stock: stock,
            outcome,
            message,
        };

        validate_listing(price, stock)?;

        if !channel.is_active {
            return Err(SyncError::ChannelInactive(channel.id).into());
        }

        if !self.limiter.try_acquire(&channel_key(channel.id)) {
            let err = SyncError::RateLimited(channel.id);
            AuditLog::new(self.db)
                .record(attempt(SyncOutcome::RateLimited, Some(err.to_string())))
                .await?;

            return Err(err.into());
        }

        let existing = LinkRegistry::new(self.db)
            .find_link(product, channel)
            .await?;
        let remote_listing_id = existing.and_then(|link| link.remote_listing_id);

        let pushed = self
            .adapters
            .push(channel, remote_listing_id.as_deref(), price, stock)
            .await;

        let (update, outcome, message) = match &pushed {
            Ok(remote) => (
                LinkUpdate::Confirmed {
                    remote_listing_id: remote.remote_listing_id.clone(),
                    price: remote.confirmed_price,
                    stock: remote.confirmed_stock.or(stock),
                },
                SyncOutcome::Success,
                None,
            ),
            Err(adapter_error) => {
                // A known remote listing stays linked; only its health degrades
                let status = if remote_listing_id.is_some() {
                    SyncStatus::Error
                } else {
                    SyncStatus::Pending
                };

                tracing::warn!(
                    organization_id = %product.organization_id(),
                    product_id = %product.id,
                    channel_id = %channel.id,
                    code = %adapter_error.code,
                    "Channel push failed"
                );

                (
                    LinkUpdate::Failed {
                        status,
                        message: adapter_error.to_string(),
                    },
                    SyncOutcome::AdapterError,
                    Some(adapter_error.to_string()),
                )
            }
        };

        let link = match self
            .store_result(product, channel, update, attempt(outcome, message.clone()))
            .await
        {
            Ok(link) => link,
            Err(err) => {
                // The channel was called, so the attempt is recorded even though the link is stale
                tracing::error!(
                    organization_id = %product.organization_id(),
                    product_id = %product.id,
                    channel_id = %channel.id,
                    "Failed to store channel push result: {}",
                    err
                );

                let note = format!("link not stored: {}", err);
                let message = match message {
                    Some(message) => format!("{}; {}", message, note),
                    None => note,
                };
                AuditLog::new(self.db)
                    .record(attempt(outcome, Some(message)))
                    .await?;

                return Err(err);
            }
        };

        match pushed {
            Ok(_) => Ok(link),
            Err(adapter_error) => Err(adapter_error.into()),
        }
    }

    /// Upsert the link and append the attempt on one transaction.
    async fn store_result(
        &self,
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
        update: LinkUpdate,
        attempt: NewSyncAttempt,
    ) -> Result<ListingLinkModel, Error> {
        let txn = self.db.begin().await?;

        let link = LinkRegistry::new(&txn)
            .upsert_link(product, channel, update)
            .await?;
        AuditLog::new(&txn).record(attempt).await?;

        txn.commit().await?;

        Ok(link)
    }
}

/// Prices must be finite and non-negative, stock non-negative.
fn validate_listing(price: f64, stock: Option<i32>) -> Result<(), SyncError> {
    if !price.is_finite() || price < 0.0 {
        return Err(SyncError::InvalidValue(format!("price {}", price)));
    }

    if let Some(stock) = stock.filter(|stock| *stock < 0) {
        return Err(SyncError::InvalidValue(format!("stock {}", stock)));
    }

    Ok(())
}
