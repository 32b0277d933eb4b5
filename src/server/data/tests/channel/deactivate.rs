//! Tests for ChannelRepository::deactivate method.

use super::*;

/// Tests disabling an active channel.
///
/// Expected: Ok(true), channel stored with is_active false
#[tokio::test]
async fn disables_owned_channel() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;

    let channel_repo = ChannelRepository::new(&test.db);

    assert!(channel_repo.deactivate(1, 1).await?);
    assert!(!channel_repo.deactivate(1, 1).await?);

    let channel = channel_repo.find_owned(1, 1).await?.unwrap();
    assert!(!channel.is_active);

    Ok(())
}

/// Tests that another organization cannot disable the channel.
///
/// Expected: Ok(false), channel still active
#[tokio::test]
async fn ignores_other_organization() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_organization("org_2")
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;

    let channel_repo = ChannelRepository::new(&test.db);

    assert!(!channel_repo.deactivate(2, 1).await?);

    let channel = channel_repo.find_owned(1, 1).await?.unwrap();
    assert!(channel.is_active);

    Ok(())
}
