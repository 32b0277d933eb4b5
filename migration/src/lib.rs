pub use sea_orm_migration::prelude::*;

mod m20251101_000001_organization;
mod m20251101_000002_catalog_product;
mod m20251101_000003_sales_channel;
mod m20251101_000004_listing_link;
mod m20251101_000005_sync_attempt;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_organization::Migration),
            Box::new(m20251101_000002_catalog_product::Migration),
            Box::new(m20251101_000003_sales_channel::Migration),
            Box::new(m20251101_000004_listing_link::Migration),
            Box::new(m20251101_000005_sync_attempt::Migration),
        ]
    }
}
