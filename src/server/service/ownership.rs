//! Ownership verification.
//!
//! Every lookup expresses the organization in the query predicate itself; a record belonging to
//! another organization is never loaded into memory. A missing record and a record owned by
//! someone else produce the same [`SyncError::NotFound`].

use std::ops::Deref;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{channel::ChannelRepository, product::ProductRepository},
    error::{
        sync::{Resource, SyncError},
        Error,
    },
    model::db::{ChannelModel, ProductModel},
};

/// A record verified to belong to `organization_id`.
///
/// Only the [`OwnershipGate`] constructs values of this type, so holding one proves the check
/// happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Owned<T> {
    organization_id: i32,
    record: T,
}

impl<T> Owned<T> {
    pub(crate) fn new(organization_id: i32, record: T) -> Self {
        Self {
            organization_id,
            record,
        }
    }

    /// Organization the record was verified against.
    pub fn organization_id(&self) -> i32 {
        self.organization_id
    }
}

impl<T> Deref for Owned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

pub struct OwnershipGate<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OwnershipGate<'a> {
    /// Creates a new instance of [`OwnershipGate`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verify that `product_id` belongs to `organization_id`.
    ///
    /// # Returns
    /// - `Ok(Owned<ProductModel>)` - The product, owned by the organization
    /// - `Err(Error::SyncError(SyncError::NotFound(Resource::Product)))` - No such product for
    ///   this organization, whether or not it exists elsewhere
    /// - `Err(Error::DbErr(_))` - Database error
    pub async fn verify_product(
        &self,
        organization_id: i32,
        product_id: i32,
    ) -> Result<Owned<ProductModel>, Error> {
        let product = ProductRepository::new(self.db)
            .find_owned(organization_id, product_id)
            .await?;

        Self::owned(organization_id, product, Resource::Product)
    }

    /// Verify that `channel_id` belongs to `organization_id`.
    ///
    /// Same anti-enumeration policy as [`Self::verify_product`].
    pub async fn verify_channel(
        &self,
        organization_id: i32,
        channel_id: i32,
    ) -> Result<Owned<ChannelModel>, Error> {
        let channel = ChannelRepository::new(self.db)
            .find_owned(organization_id, channel_id)
            .await?;

        Self::owned(organization_id, channel, Resource::Channel)
    }

    /// Resolve a product from a code or barcode within `organization_id`.
    ///
    /// The product code is matched first, then the barcode. Identical codes owned by other
    /// organizations are never considered.
    pub async fn resolve_product_by_code(
        &self,
        organization_id: i32,
        code: &str,
    ) -> Result<Owned<ProductModel>, Error> {
        let product_repo = ProductRepository::new(self.db);

        let product = match product_repo.find_by_code(organization_id, code).await? {
            Some(product) => Some(product),
            None => product_repo.find_by_barcode(organization_id, code).await?,
        };

        Self::owned(organization_id, product, Resource::Product)
    }

    fn owned<T>(
        organization_id: i32,
        record: Option<T>,
        resource: Resource,
    ) -> Result<Owned<T>, Error> {
        match record {
            Some(record) => Ok(Owned::new(organization_id, record)),
            None => {
                tracing::debug!(
                    organization_id = %organization_id,
                    resource = %resource,
                    "Ownership check did not resolve"
                );

                Err(SyncError::NotFound(resource).into())
            }
        }
    }
}
