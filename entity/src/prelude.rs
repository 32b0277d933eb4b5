pub use super::catalog_product::Entity as CatalogProduct;
pub use super::listing_link::Entity as ListingLink;
pub use super::organization::Entity as Organization;
pub use super::sales_channel::Entity as SalesChannel;
pub use super::sync_attempt::Entity as SyncAttempt;
