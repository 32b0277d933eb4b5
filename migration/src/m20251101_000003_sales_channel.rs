use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_organization::Organization;

static IDX_SALES_CHANNEL_ORGANIZATION_ID: &str = "idx-sales_channel-organization_id";
static FK_SALES_CHANNEL_ORGANIZATION_ID: &str = "fk-sales_channel-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SalesChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(SalesChannel::Id))
                    .col(integer(SalesChannel::OrganizationId))
                    .col(string(SalesChannel::Kind))
                    .col(string(SalesChannel::Name))
                    .col(string_null(SalesChannel::EndpointUrl))
                    .col(string_null(SalesChannel::ApiKey))
                    .col(boolean(SalesChannel::IsActive).default(true))
                    .col(timestamp(SalesChannel::CreatedAt))
                    .col(timestamp(SalesChannel::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SALES_CHANNEL_ORGANIZATION_ID)
                    .table(SalesChannel::Table)
                    .col(SalesChannel::OrganizationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SALES_CHANNEL_ORGANIZATION_ID)
                    .from_tbl(SalesChannel::Table)
                    .from_col(SalesChannel::OrganizationId)
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
                    .name(FK_SALES_CHANNEL_ORGANIZATION_ID)
                    .table(SalesChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SALES_CHANNEL_ORGANIZATION_ID)
                    .table(SalesChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SalesChannel::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SalesChannel {
    Table,
    Id,
    OrganizationId,
    Kind,
    Name,
    EndpointUrl,
    ApiKey,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
