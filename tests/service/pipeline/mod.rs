//! Tests for SyncPipeline.

mod links;
mod push_price;

use entity::listing_link::SyncStatus;
use marketlink::server::error::{sync::SyncError, Error};

use super::*;

/// One organization with product 1 (`SKU-100`) and channel 1 of the scripted kind.
async fn single_product() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_catalog_tables()
        .with_organization("org_1")
        .with_product(1, "SKU-100", 10.0)
        .with_channel(1, TEST_CHANNEL_KIND)
        .build()
        .await
}
