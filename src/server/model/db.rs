//! Database model type aliases.
//!
//! Short names for the SeaORM entity models so service signatures don't have to spell out
//! the `entity` crate paths.

/// A seller's canonical product. Codes are unique per organization only.
///
/// # Fields (from `entity::catalog_product::Model`)
/// - `id` - Primary key
/// - `organization_id` - Owning organization
/// - `code` - Tenant-scoped product code
/// - `barcode` - Optional barcode, also tenant-scoped
/// - `price` / `stock` - Canonical values maintained by catalog management
pub type ProductModel = entity::catalog_product::Model;

/// A configured external sales destination belonging to one organization.
pub type ChannelModel = entity::sales_channel::Model;

/// Association between a product and its listing on one channel.
///
/// Keyed by `(organization_id, product_id, channel_id)`; at most one row per triple.
pub type ListingLinkModel = entity::listing_link::Model;

/// Immutable record of one synchronization call.
pub type SyncAttemptModel = entity::sync_attempt::Model;
