//! Tests for the pipeline's link read and lifecycle operations.

use marketlink::server::service::pipeline::batch::BatchRow;

use super::*;

/// Tests delinking a listed product.
///
/// Expected: remote id cleared; the next push creates a new remote listing
#[tokio::test]
async fn delink_forces_new_remote_listing() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    let delinked = pipeline.delink(1, 1, 1).await.unwrap();

    assert!(delinked.remote_listing_id.is_none());
    assert_eq!(delinked.status, SyncStatus::Inactive);

    let relinked = pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    assert_eq!(relinked.remote_listing_id.as_deref(), Some("remote-1-2"));
    assert!(adapter.calls()[1].remote_listing_id.is_none());

    Ok(())
}

/// Tests deactivating a channel.
///
/// Expected: its links become inactive with remote ids preserved
#[tokio::test]
async fn deactivate_channel_preserves_remote_ids() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-1", 10.0)
        .with_product(1, "SKU-2", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    pipeline.push_price(1, 2, 1, 10.0).await.unwrap();

    let deactivated = pipeline.deactivate_channel(1, 1).await.unwrap();
    assert_eq!(deactivated, 2);

    let link = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(link.status, SyncStatus::Inactive);
    assert!(link.remote_listing_id.is_some());

    Ok(())
}

/// Tests pushing to a channel after its links were deactivated.
///
/// Expected: Err(ChannelInactive) without an adapter call; the link stays inactive
#[tokio::test]
async fn push_after_deactivation_is_refused() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, adapter) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);
    let pipeline = state.pipeline();

    pipeline.push_price(1, 1, 1, 10.0).await.unwrap();
    pipeline.deactivate_channel(1, 1).await.unwrap();

    let single = pipeline.push_price(1, 1, 1, 11.0).await;
    let batch = pipeline
        .push_batch(1, &[1], &[BatchRow::new("SKU-100", 11.0)])
        .await
        .unwrap();

    assert!(matches!(
        single,
        Err(Error::SyncError(SyncError::ChannelInactive(1)))
    ));
    assert_eq!(batch.succeeded, 0);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(adapter.calls().len(), 1);

    let link = pipeline.find_link(1, 1, 1).await.unwrap().unwrap();
    assert_eq!(link.status, SyncStatus::Inactive);
    assert_eq!(link.price, Some(10.0));

    let attempts = pipeline.list_attempts(1, 1, Some(1)).await.unwrap();
    assert_eq!(attempts.len(), 1);

    Ok(())
}

/// Tests that another organization cannot deactivate the channel.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn deactivate_foreign_channel_is_not_found() -> Result<(), TestError> {
    let test = single_product().await?;
    test.catalog().insert_organization("org_2").await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().deactivate_channel(2, 1).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::NotFound(_)))
    ));

    // The owner can still push to the channel
    assert!(state.pipeline().push_price(1, 1, 1, 10.0).await.is_ok());

    Ok(())
}

/// Expect Ok(None) for a product never pushed to the channel
#[tokio::test]
async fn find_link_returns_none_before_first_push() -> Result<(), TestError> {
    let test = single_product().await?;
    let (state, _) = test_state(&test, DEFAULT_TEST_RATE_LIMIT);

    let result = state.pipeline().find_link(1, 1, 1).await;

    assert!(matches!(result, Ok(None)));

    Ok(())
}
