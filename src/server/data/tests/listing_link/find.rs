//! Tests for ListingLinkRepository::find_by_product and find_by_product_channel.

use super::*;

/// Tests listing every link of a product.
///
/// Expected: one row per linked channel
#[tokio::test]
async fn finds_links_by_product() -> Result<(), TestError> {
    let test = single_tenant().await?;

    let link_repo = ListingLinkRepository::new(&test.db);
    link_repo
        .upsert(1, 1, 1, confirmed("A-1", 10.0, None))
        .await?;
    link_repo
        .upsert(1, 1, 2, confirmed("B-1", 10.0, None))
        .await?;

    let links = link_repo.find_by_product(1).await?;
    assert_eq!(links.len(), 2);

    let links = link_repo.find_by_product_channel(1, 2).await?;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].remote_listing_id.as_deref(), Some("B-1"));

    Ok(())
}

/// Tests that reads by product include rows filed under another organization.
///
/// Expected: the corrupted row is returned so callers can detect it
#[tokio::test]
async fn returns_rows_of_any_organization() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_organization("org_2")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await?;
    test.catalog()
        .insert_link(2, 1, 1, Some("X-1"), SyncStatus::Active)
        .await?;

    let link_repo = ListingLinkRepository::new(&test.db);
    let links = link_repo.find_by_product_channel(1, 1).await?;

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].organization_id, 2);

    Ok(())
}

/// Expect an empty list for a product without links
#[tokio::test]
async fn returns_empty_for_unlinked_product() -> Result<(), TestError> {
    let test = single_tenant().await?;

    let link_repo = ListingLinkRepository::new(&test.db);
    let links = link_repo.find_by_product(1).await?;

    assert!(links.is_empty());

    Ok(())
}
