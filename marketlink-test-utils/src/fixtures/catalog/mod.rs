//! Catalog fixture utilities.
//!
//! Inserts rows directly through SeaORM, bypassing the ownership gate, so tests can build any
//! state they need, including states the engine itself would refuse to produce.

pub mod factory;

use chrono::Utc;
use entity::listing_link::SyncStatus;
use sea_orm::{ActiveModelTrait, ActiveValue};

use crate::{
    constant::{TEST_API_KEY, TEST_CHANNEL_KIND},
    error::TestError,
    TestContext,
};

/// Fixture helpers bound to a [`TestContext`].
pub struct CatalogFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> CatalogFixtures<'a> {
    pub(crate) fn new(setup: &'a TestContext) -> Self {
        Self { setup }
    }

    /// Insert an organization with the provided name.
    pub async fn insert_organization(
        &self,
        name: &str,
    ) -> Result<entity::organization::Model, TestError> {
        let organization = entity::organization::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(organization.insert(&self.setup.db).await?)
    }

    /// Insert a product with 10 units of stock and no barcode.
    pub async fn insert_product(
        &self,
        organization_id: i32,
        code: &str,
        price: f64,
    ) -> Result<entity::catalog_product::Model, TestError> {
        self.insert_product_with_barcode(organization_id, code, None, price)
            .await
    }

    /// Insert a product carrying a barcode in addition to its code.
    pub async fn insert_product_with_barcode(
        &self,
        organization_id: i32,
        code: &str,
        barcode: Option<&str>,
        price: f64,
    ) -> Result<entity::catalog_product::Model, TestError> {
        let now = Utc::now().naive_utc();
        let product = entity::catalog_product::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            code: ActiveValue::Set(code.to_string()),
            barcode: ActiveValue::Set(barcode.map(str::to_string)),
            name: ActiveValue::Set(format!("Product {}", code)),
            price: ActiveValue::Set(price),
            stock: ActiveValue::Set(10),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(product.insert(&self.setup.db).await?)
    }

    /// Insert an active channel whose endpoint is the mock server.
    pub async fn insert_channel(
        &self,
        organization_id: i32,
        kind: &str,
    ) -> Result<entity::sales_channel::Model, TestError> {
        self.insert_channel_with_state(organization_id, kind, true)
            .await
    }

    /// Insert a channel with an explicit activation flag.
    pub async fn insert_channel_with_state(
        &self,
        organization_id: i32,
        kind: &str,
        is_active: bool,
    ) -> Result<entity::sales_channel::Model, TestError> {
        let now = Utc::now().naive_utc();
        let channel = entity::sales_channel::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            kind: ActiveValue::Set(kind.to_string()),
            name: ActiveValue::Set(format!("{} channel", kind)),
            endpoint_url: ActiveValue::Set(Some(self.setup.server.url())),
            api_key: ActiveValue::Set(Some(TEST_API_KEY.to_string())),
            is_active: ActiveValue::Set(is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(channel.insert(&self.setup.db).await?)
    }

    /// Insert a channel of the default scripted kind.
    pub async fn insert_mock_channel(
        &self,
        organization_id: i32,
    ) -> Result<entity::sales_channel::Model, TestError> {
        self.insert_channel(organization_id, TEST_CHANNEL_KIND).await
    }

    /// Insert a listing link row as-is.
    ///
    /// No tenant consistency check is made: passing an `organization_id` that differs from the
    /// product's or channel's organization produces a corrupted row on purpose.
    pub async fn insert_link(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
        remote_listing_id: Option<&str>,
        status: SyncStatus,
    ) -> Result<entity::listing_link::Model, TestError> {
        let now = Utc::now().naive_utc();
        let link = entity::listing_link::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            product_id: ActiveValue::Set(product_id),
            channel_id: ActiveValue::Set(channel_id),
            remote_listing_id: ActiveValue::Set(remote_listing_id.map(str::to_string)),
            price: ActiveValue::Set(Some(1.0)),
            stock: ActiveValue::Set(None),
            status: ActiveValue::Set(status),
            last_error: ActiveValue::Set(None),
            last_attempt_at: ActiveValue::Set(Some(now)),
            last_success_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        Ok(link.insert(&self.setup.db).await?)
    }
}
