//! Tests for SyncAttemptRepository::find_for_link method.

use super::*;

/// Tests reading attempts newest first, optionally narrowed to a channel.
///
/// Expected: attempts in reverse insertion order
#[tokio::test]
async fn returns_newest_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;

    let attempt_repo = SyncAttemptRepository::new(&test.db);
    attempt_repo
        .create(attempt(1, 1, SyncOutcome::Success))
        .await?;
    attempt_repo
        .create(attempt(1, 2, SyncOutcome::RateLimited))
        .await?;
    attempt_repo
        .create(attempt(1, 1, SyncOutcome::AdapterError))
        .await?;

    let all = attempt_repo.find_for_link(1, 1, None).await?;
    let outcomes: Vec<_> = all.iter().map(|a| a.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            SyncOutcome::AdapterError,
            SyncOutcome::RateLimited,
            SyncOutcome::Success
        ]
    );

    let channel_1 = attempt_repo.find_for_link(1, 1, Some(1)).await?;
    assert_eq!(channel_1.len(), 2);
    assert!(channel_1.iter().all(|a| a.channel_id == 1));

    Ok(())
}

/// Expect no attempts of another organization
#[tokio::test]
async fn excludes_other_organizations() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_organization("org_2")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;

    let attempt_repo = SyncAttemptRepository::new(&test.db);
    attempt_repo
        .create(attempt(1, 1, SyncOutcome::Success))
        .await?;

    let result = attempt_repo.find_for_link(2, 1, None).await?;
    assert!(result.is_empty());

    Ok(())
}
