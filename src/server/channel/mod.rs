//! Channel adapters.
//!
//! An adapter translates a generic listing update into one external channel's protocol. The
//! engine treats the payload shapes as opaque: it only sees [`ChannelAdapter::push`] and the
//! [`RemoteListing`] or [`AdapterError`] it returns.

pub mod http;
pub mod registry;

use async_trait::async_trait;

pub use registry::AdapterRegistry;

use crate::server::{error::adapter::AdapterError, model::db::ChannelModel};

/// State of a listing as confirmed by the channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteListing {
    /// Identifier assigned by the channel
    pub remote_listing_id: String,
    pub confirmed_price: f64,
    /// Absent when the channel does not report stock back
    pub confirmed_stock: Option<i32>,
}

/// Capability implemented once per channel kind.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Create or update the listing for a product on `channel`.
    ///
    /// `remote_listing_id` is `None` when the product has never been listed on the channel, in
    /// which case the adapter creates the listing and returns its new identifier.
    async fn push(
        &self,
        channel: &ChannelModel,
        remote_listing_id: Option<&str>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<RemoteListing, AdapterError>;
}
