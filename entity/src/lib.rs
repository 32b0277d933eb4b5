//! SeaORM entities for the marketlink schema.

pub mod prelude;

pub mod catalog_product;
pub mod listing_link;
pub mod organization;
pub mod sales_channel;
pub mod sync_attempt;
