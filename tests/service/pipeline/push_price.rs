//! Tests for SyncPipeline::push_price and push_listing.
//!
//! Verifies ownership checks, value validation, link state transitions on success and failure,
//! throttling without state change, inactive channels, adapter timeouts and auditing when the
//! result cannot be stored.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use entity::sync_attempt::SyncOutcome;
use marketlink::server::{
    channel::{AdapterRegistry, ChannelAdapter, RemoteListing},
    error::adapter::AdapterError,
    model::{app::AppState, db::ChannelModel},
    rate_limit::TokenBucketLimiter,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};

use super::*;
use crate::util::MockChannelAdapter;

/// Tests the first successful push of a product to a channel.
///
/// Expected: Ok with an active link carrying the remote id assigned by the channel
#[tokio::test]
async fn creates_active_link() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().push_price(1, 1, 1, 19.9).await;

    assert!(result.is_ok());
    let link = result.unwrap();
    assert_eq!(link.organization_id, 1);
    assert_eq!(link.status, SyncStatus::Active);
    assert_eq!(link.remote_listing_id.as_deref(), Some("remote-1-1"));
    assert_eq!(link.price, Some(19.9));
    assert!(link.last_success_at.is_some());

    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].remote_listing_id.is_none());

    Ok(())
}

/// Tests that later pushes update the known remote listing.
///
/// Expected: the adapter receives the stored remote id, a single link row remains
#[tokio::test]
async fn updates_existing_remote_listing() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    let link = pipeline
        .push_listing(1, 1, 1, 12.0, Some(4))
        .await
        .unwrap();

    assert_eq!(link.remote_listing_id.as_deref(), Some("remote-1-1"));
    assert_eq!(link.price, Some(12.0));
    assert_eq!(link.stock, Some(4));

    let calls = adapter.calls();
    assert_eq!(calls[1].remote_listing_id.as_deref(), Some("remote-1-1"));
    assert_eq!(calls[1].stock, Some(4));

    let links = pipeline.list_links_for_product(1, 1).await.unwrap();
    assert_eq!(links.len(), 1);

    Ok(())
}

/// Tests pushing a product owned by another organization.
///
/// Expected: Err(NotFound), no adapter call, no attempt recorded
#[tokio::test]
async fn rejects_product_of_other_organization() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_a")
        .with_organization("org_b")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(2, TEST_CHANNEL_KIND)
        .build()
        .await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().push_price(2, 1, 1, 1.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::NotFound(_)))
    ));
    assert!(adapter.calls().is_empty());

    let attempts = entity::prelude::SyncAttempt::find().all(&test.db).await?;
    assert!(attempts.is_empty());

    Ok(())
}

/// Tests pushing to a channel owned by another organization.
///
/// Expected: Err(NotFound), no adapter call
#[tokio::test]
async fn rejects_channel_of_other_organization() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_a")
        .with_organization("org_b")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(2, TEST_CHANNEL_KIND)
        .build()
        .await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().push_price(1, 1, 1, 1.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::NotFound(_)))
    ));
    assert!(adapter.calls().is_empty());

    Ok(())
}

/// Tests a first push rejected by the channel.
///
/// Expected: Err(Adapter); a pending link without remote id records the error
#[tokio::test]
async fn first_failure_leaves_pending_link() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    adapter.fail_next("http_422", "invalid category");
    let result = pipeline.push_price(1, 1, 1, 10.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::Adapter(ref err))) if err.code == "http_422"
    ));

    let link = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(link.status, SyncStatus::Pending);
    assert!(link.remote_listing_id.is_none());
    assert_eq!(link.last_error.as_deref(), Some("http_422: invalid category"));

    Ok(())
}

/// Tests a failed price push after the listing exists.
///
/// Expected: Err(Adapter); link marked error with the remote id and last price kept
#[tokio::test]
async fn failure_keeps_remote_listing_id() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    adapter.fail_next("http_503", "maintenance");
    let result = pipeline.push_price(1, 1, 1, 11.0).await;

    assert!(result.is_err());
    let error = result.unwrap_err();
    assert_eq!(
        error.to_retry_strategy(),
        marketlink::server::error::retry::ErrorRetryStrategy::Retry
    );

    let link = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(link.status, SyncStatus::Error);
    assert_eq!(link.remote_listing_id.as_deref(), Some("remote-1-1"));
    assert_eq!(link.price, Some(10.0));

    // The next successful push recovers the link
    let link = pipeline.push_price(1, 1, 1, 11.0).await.unwrap();
    assert_eq!(link.status, SyncStatus::Active);
    assert!(link.last_error.is_none());

    Ok(())
}

/// Tests throttling after successful pushes on the same channel.
///
/// With a limit of 3, the fourth push is denied: reported as RateLimited, the adapter is not
/// called, the link keeps the state of the third push and the denial is audited.
///
/// Expected: Err(RateLimited) and no link state change
#[tokio::test]
async fn throttled_push_leaves_link_unchanged() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, 3);
    let pipeline = state.pipeline();

    for price in [10.0, 11.0, 12.0] {
        pipeline.push_price(1, 1, 1, price).await.unwrap();
    }
    let before = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();

    let result = pipeline.push_price(1, 1, 1, 13.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::RateLimited(1)))
    ));
    assert_eq!(adapter.calls().len(), 3);

    let after = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(before, after);

    let attempts = pipeline.list_attempts(1, 1, Some(1)).await.unwrap();
    assert_eq!(attempts[0].outcome, SyncOutcome::RateLimited);

    Ok(())
}

/// Tests pushing to a disabled channel.
///
/// Expected: Err(ChannelInactive) without calling the adapter or spending a token
#[tokio::test]
async fn rejects_inactive_channel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-100", 10.0)
        .build()
        .await?;
    test.catalog()
        .insert_channel_with_state(1, TEST_CHANNEL_KIND, false)
        .await?;
    let (state, adapter) = test_state(&test, 1);

    let result = state.pipeline().push_price(1, 1, 1, 10.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::ChannelInactive(1)))
    ));
    assert!(adapter.calls().is_empty());

    Ok(())
}

/// Tests an adapter call exceeding its timeout.
///
/// Expected: Err(Adapter) with code `timeout`; link recorded as pending
#[tokio::test]
async fn adapter_timeout_is_recorded_as_failure() -> Result<(), TestError> {
    let test = single_product().await?;
    let adapter = MockChannelAdapter::new();
    let state = AppState {
        db: test.db.clone(),
        limiter: Arc::new(TokenBucketLimiter::new(10, Duration::from_secs(60))),
        adapters: Arc::new(AdapterRegistry::new(Duration::from_secs(5)).register_with_timeout(
            TEST_CHANNEL_KIND,
            adapter.clone(),
            Duration::from_millis(20),
        )),
    };
    let pipeline = state.pipeline();

    adapter.delay_next(Duration::from_millis(500));
    let result = pipeline.push_price(1, 1, 1, 10.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::Adapter(ref err))) if err.code == "timeout"
    ));

    let link = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(link.status, SyncStatus::Pending);

    Ok(())
}

/// Tests a channel kind without a registered adapter.
///
/// Expected: Err(Adapter) with code `unsupported_channel`
#[tokio::test]
async fn unsupported_channel_kind_fails() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(1, "carrier_pigeon")
        .build()
        .await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().push_price(1, 1, 1, 10.0).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::Adapter(ref err))) if err.code == "unsupported_channel"
    ));

    Ok(())
}

/// Tests values no channel accepts.
///
/// Expected: Err(InvalidValue) before the limiter; nothing sent, stored or audited
#[tokio::test]
async fn rejects_invalid_values() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, 1);
    let pipeline = state.pipeline();

    for (price, stock) in [
        (-5.0, None),
        (f64::NAN, None),
        (f64::INFINITY, None),
        (10.0, Some(-1)),
    ] {
        let result = pipeline.push_listing(1, 1, 1, price, stock).await;
        assert!(
            matches!(result, Err(Error::SyncError(SyncError::InvalidValue(_)))),
            "{price} {stock:?}"
        );
    }

    assert!(adapter.calls().is_empty());
    assert!(pipeline.find_link(1, 1, 1).await.unwrap().is_none());
    assert!(pipeline.list_attempts(1, 1, None).await.unwrap().is_empty());

    // The single token was not spent
    let link = pipeline.push_listing(1, 1, 1, 0.0, Some(0)).await.unwrap();
    assert_eq!(link.price, Some(0.0));

    Ok(())
}

/// Adapter that confirms the push after dropping the link table, so storing the result fails.
struct LinkTableDroppingAdapter {
    db: DatabaseConnection,
}

#[async_trait]
impl ChannelAdapter for LinkTableDroppingAdapter {
    async fn push(
        &self,
        channel: &ChannelModel,
        _remote_listing_id: Option<&str>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<RemoteListing, AdapterError> {
        self.db
            .execute_unprepared("DROP TABLE listing_link")
            .await
            .map_err(AdapterError::transport)?;

        Ok(RemoteListing {
            remote_listing_id: format!("remote-{}", channel.id),
            confirmed_price: price,
            confirmed_stock: stock,
        })
    }
}

/// Tests a push the channel accepted but the link registry could not store.
///
/// Expected: Err(DbErr), and the attempt is still audited as a success naming the storage
/// failure
#[tokio::test]
async fn audits_attempt_when_link_cannot_be_stored() -> Result<(), TestError> {
    let test = single_product().await?;
    let state = AppState {
        db: test.db.clone(),
        limiter: Arc::new(TokenBucketLimiter::new(10, Duration::from_secs(60))),
        adapters: Arc::new(AdapterRegistry::new(Duration::from_secs(5)).register(
            TEST_CHANNEL_KIND,
            Arc::new(LinkTableDroppingAdapter {
                db: test.db.clone(),
            }),
        )),
    };
    let pipeline = state.pipeline();

    let result = pipeline.push_price(1, 1, 1, 10.0).await;

    assert!(matches!(result, Err(Error::DbErr(_))));

    let attempts = pipeline.list_attempts(1, 1, Some(1)).await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].outcome, SyncOutcome::Success);
    assert!(attempts[0]
        .message
        .as_deref()
        .unwrap()
        .starts_with("link not stored:"));

    Ok(())
}
