//! Tests for ProductRepository::find_owned method.

use super::*;

/// Tests finding a product owned by the requesting organization.
///
/// Expected: Ok(Some(product))
#[tokio::test]
async fn finds_owned_product() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-100", 19.9)
        .build()
        .await?;

    let product_repo = ProductRepository::new(&test.db);
    let result = product_repo.find_owned(1, 1).await;

    assert!(result.is_ok());
    let product = result.unwrap().unwrap();
    assert_eq!(product.code, "SKU-100");
    assert_eq!(product.organization_id, 1);

    Ok(())
}

/// Tests that a product of another organization is not returned.
///
/// Expected: Ok(None), same as a product that does not exist
#[tokio::test]
async fn returns_none_for_other_organization() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_organization("org_2")
        .with_product(1, "SKU-100", 19.9)
        .build()
        .await?;

    let product_repo = ProductRepository::new(&test.db);
    let foreign = product_repo.find_owned(2, 1).await?;
    let missing = product_repo.find_owned(2, 999).await?;

    assert!(foreign.is_none());
    assert!(missing.is_none());

    Ok(())
}

/// Expect Error when the required tables do not exist
#[tokio::test]
async fn fails_without_tables() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let product_repo = ProductRepository::new(&test.db);
    let result = product_repo.find_owned(1, 1).await;

    assert!(result.is_err());

    Ok(())
}
