use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_organization::Organization;

static IDX_CATALOG_PRODUCT_ORGANIZATION_CODE: &str = "idx-catalog_product-organization_id-code";
static IDX_CATALOG_PRODUCT_ORGANIZATION_BARCODE: &str =
    "idx-catalog_product-organization_id-barcode";
static FK_CATALOG_PRODUCT_ORGANIZATION_ID: &str = "fk-catalog_product-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogProduct::Table)
                    .if_not_exists()
                    .col(pk_auto(CatalogProduct::Id))
                    .col(integer(CatalogProduct::OrganizationId))
                    .col(string(CatalogProduct::Code))
                    .col(string_null(CatalogProduct::Barcode))
                    .col(string(CatalogProduct::Name))
                    .col(double(CatalogProduct::Price))
                    .col(integer(CatalogProduct::Stock))
                    .col(timestamp(CatalogProduct::CreatedAt))
                    .col(timestamp(CatalogProduct::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Codes are unique per tenant only; two organizations may share a code.
        manager
            .create_index(
                Index::create()
                    .name(IDX_CATALOG_PRODUCT_ORGANIZATION_CODE)
                    .table(CatalogProduct::Table)
                    .col(CatalogProduct::OrganizationId)
                    .col(CatalogProduct::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CATALOG_PRODUCT_ORGANIZATION_BARCODE)
                    .table(CatalogProduct::Table)
                    .col(CatalogProduct::OrganizationId)
                    .col(CatalogProduct::Barcode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CATALOG_PRODUCT_ORGANIZATION_ID)
                    .from_tbl(CatalogProduct::Table)
                    .from_col(CatalogProduct::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CATALOG_PRODUCT_ORGANIZATION_ID)
                    .table(CatalogProduct::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CATALOG_PRODUCT_ORGANIZATION_BARCODE)
                    .table(CatalogProduct::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CATALOG_PRODUCT_ORGANIZATION_CODE)
                    .table(CatalogProduct::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CatalogProduct::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CatalogProduct {
    Table,
    Id,
    OrganizationId,
    Code,
    Barcode,
    Name,
    Price,
    Stock,
    CreatedAt,
    UpdatedAt,
}
