//! Link registry.
//!
//! Authoritative store of product to channel listing associations. Mutations take
//! [`Owned`] product and channel records, so a link can only be written after both were
//! verified against the caller's organization. Every read checks the rows it returns for
//! tenant consistency and fails loudly with [`SyncError::InvariantViolation`] on a mismatch.

use sea_orm::ConnectionTrait;

use crate::server::{
    data::{
        channel::ChannelRepository,
        listing_link::{LinkUpdate, ListingLinkRepository},
    },
    error::{
        sync::{Resource, SyncError},
        Error,
    },
    model::db::{ChannelModel, ListingLinkModel, ProductModel},
    service::ownership::Owned,
};

pub struct LinkRegistry<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LinkRegistry<'a, C> {
    /// Creates a new instance of [`LinkRegistry`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Get the link between a product and a channel, if one exists.
    ///
    /// # Returns
    /// - `Ok(Some(link))` / `Ok(None)` - Lookup result
    /// - `Err(SyncError::InvariantViolation)` - A row for this product and channel is filed
    ///   under another organization
    pub async fn find_link(
        &self,
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
    ) -> Result<Option<ListingLinkModel>, Error> {
        Self::ensure_same_tenant(product, channel)?;

        let links = ListingLinkRepository::new(self.db)
            .find_by_product_channel(product.id, channel.id)
            .await?;

        let mut links = Self::checked(product.organization_id(), links)?;

        Ok(links.pop())
    }

    /// Get every link of a product. Order is unspecified.
    pub async fn list_links_for_product(
        &self,
        product: &Owned<ProductModel>,
    ) -> Result<Vec<ListingLinkModel>, Error> {
        let links = ListingLinkRepository::new(self.db)
            .find_by_product(product.id)
            .await?;

        Self::checked(product.organization_id(), links)
    }

    /// Insert or update the link for the product and channel.
    ///
    /// At most one row exists per (organization, product, channel); concurrent calls resolve
    /// last writer wins.
    pub async fn upsert_link(
        &self,
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
        update: LinkUpdate,
    ) -> Result<ListingLinkModel, Error> {
        Self::ensure_same_tenant(product, channel)?;

        let link = ListingLinkRepository::new(self.db)
            .upsert(product.organization_id(), product.id, channel.id, update)
            .await?;

        Ok(link)
    }

    /// Disable the channel and mark every link on it inactive, keeping remote ids and history.
    ///
    /// Pushes to a disabled channel fail with [`SyncError::ChannelInactive`], so the links stay
    /// inactive until account management enables the channel again. Run both writes on one
    /// transaction.
    pub async fn deactivate_channel(&self, channel: &Owned<ChannelModel>) -> Result<u64, Error> {
        ChannelRepository::new(self.db)
            .deactivate(channel.organization_id(), channel.id)
            .await?;

        let deactivated = ListingLinkRepository::new(self.db)
            .deactivate_by_channel(channel.organization_id(), channel.id)
            .await?;

        tracing::info!(
            organization_id = %channel.organization_id(),
            channel_id = %channel.id,
            deactivated,
            "Deactivated channel listing links"
        );

        Ok(deactivated)
    }

    /// Break the association with the remote listing: clears the remote id and marks the link
    /// inactive. The next push creates a new remote listing.
    pub async fn delink(
        &self,
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
    ) -> Result<ListingLinkModel, Error> {
        if self.find_link(product, channel).await?.is_none() {
            return Err(SyncError::NotFound(Resource::Link).into());
        }

        ListingLinkRepository::new(self.db)
            .delink(product.organization_id(), product.id, channel.id)
            .await?
            .ok_or_else(|| SyncError::NotFound(Resource::Link).into())
    }

    fn ensure_same_tenant(
        product: &Owned<ProductModel>,
        channel: &Owned<ChannelModel>,
    ) -> Result<(), Error> {
        let organization_id = product.organization_id();

        if channel.organization_id() != organization_id
            || product.organization_id != organization_id
            || channel.organization_id != organization_id
        {
            return Err(Self::violation(
                organization_id,
                product.id,
                channel.id,
                "product and channel belong to different organizations",
            ));
        }

        Ok(())
    }

    fn checked(
        organization_id: i32,
        links: Vec<ListingLinkModel>,
    ) -> Result<Vec<ListingLinkModel>, Error> {
        if let Some(link) = links
            .iter()
            .find(|link| link.organization_id != organization_id)
        {
            return Err(Self::violation(
                organization_id,
                link.product_id,
                link.channel_id,
                "listing link is filed under another organization",
            ));
        }

        Ok(links)
    }

    fn violation(organization_id: i32, product_id: i32, channel_id: i32, reason: &str) -> Error {
        tracing::error!(
            organization_id = %organization_id,
            product_id = %product_id,
            channel_id = %channel_id,
            "Tenant isolation violated: {}",
            reason
        );

        SyncError::InvariantViolation(format!(
            "product {} on channel {}: {}",
            product_id, channel_id, reason
        ))
        .into()
    }
}
