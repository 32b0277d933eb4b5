use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_organization::Organization,
    m20251101_000002_catalog_product::CatalogProduct,
    m20251101_000003_sales_channel::SalesChannel,
};

static PK_LISTING_LINK: &str = "pk-listing_link";
static IDX_LISTING_LINK_CHANNEL_ID: &str = "idx-listing_link-channel_id";
static FK_LISTING_LINK_ORGANIZATION_ID: &str = "fk-listing_link-organization_id";
static FK_LISTING_LINK_PRODUCT_ID: &str = "fk-listing_link-product_id";
static FK_LISTING_LINK_CHANNEL_ID: &str = "fk-listing_link-channel_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ListingLink::Table)
                    .if_not_exists()
                    .col(integer(ListingLink::OrganizationId))
                    .col(integer(ListingLink::ProductId))
                    .col(integer(ListingLink::ChannelId))
                    .col(string_null(ListingLink::RemoteListingId))
                    .col(double_null(ListingLink::Price))
                    .col(integer_null(ListingLink::Stock))
                    .col(string_len(ListingLink::Status, 16))
                    .col(text_null(ListingLink::LastError))
                    .col(timestamp_null(ListingLink::LastAttemptAt))
                    .col(timestamp_null(ListingLink::LastSuccessAt))
                    .col(timestamp(ListingLink::CreatedAt))
                    .col(timestamp(ListingLink::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .name(PK_LISTING_LINK)
                            .col(ListingLink::OrganizationId)
                            .col(ListingLink::ProductId)
                            .col(ListingLink::ChannelId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LISTING_LINK_CHANNEL_ID)
                    .table(ListingLink::Table)
                    .col(ListingLink::OrganizationId)
                    .col(ListingLink::ChannelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LISTING_LINK_ORGANIZATION_ID)
                    .from_tbl(ListingLink::Table)
                    .from_col(ListingLink::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LISTING_LINK_PRODUCT_ID)
                    .from_tbl(ListingLink::Table)
                    .from_col(ListingLink::ProductId)
                    .to_tbl(CatalogProduct::Table)
                    .to_col(CatalogProduct::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LISTING_LINK_CHANNEL_ID)
                    .from_tbl(ListingLink::Table)
                    .from_col(ListingLink::ChannelId)
                    .to_tbl(SalesChannel::Table)
                    .to_col(SalesChannel::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for fk in [
            FK_LISTING_LINK_CHANNEL_ID,
            FK_LISTING_LINK_PRODUCT_ID,
            FK_LISTING_LINK_ORGANIZATION_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(fk)
                        .table(ListingLink::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LISTING_LINK_CHANNEL_ID)
                    .table(ListingLink::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ListingLink::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ListingLink {
    Table,
    OrganizationId,
    ProductId,
    ChannelId,
    RemoteListingId,
    Price,
    Stock,
    Status,
    LastError,
    LastAttemptAt,
    LastSuccessAt,
    CreatedAt,
    UpdatedAt,
}
