use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_organization::Organization;

static IDX_SYNC_ATTEMPT_LINK: &str = "idx-sync_attempt-organization_id-product_id-channel_id";
static FK_SYNC_ATTEMPT_ORGANIZATION_ID: &str = "fk-sync_attempt-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Append-only; no foreign keys to product or channel so history survives their removal.
        manager
            .create_table(
                Table::create()
                    .table(SyncAttempt::Table)
                    .if_not_exists()
                    .col(pk_auto(SyncAttempt::Id))
                    .col(integer(SyncAttempt::OrganizationId))
                    .col(integer(SyncAttempt::ProductId))
                    .col(integer(SyncAttempt::ChannelId))
                    .col(double_null(SyncAttempt::RequestedPrice))
                    .col(integer_null(SyncAttempt::RequestedStock))
                    .col(string_len(SyncAttempt::Outcome, 16))
                    .col(text_null(SyncAttempt::Message))
                    .col(timestamp(SyncAttempt::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SYNC_ATTEMPT_LINK)
                    .table(SyncAttempt::Table)
                    .col(SyncAttempt::OrganizationId)
                    .col(SyncAttempt::ProductId)
                    .col(SyncAttempt::ChannelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SYNC_ATTEMPT_ORGANIZATION_ID)
                    .from_tbl(SyncAttempt::Table)
                    .from_col(SyncAttempt::OrganizationId)
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
                    .name(FK_SYNC_ATTEMPT_ORGANIZATION_ID)
                    .table(SyncAttempt::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SYNC_ATTEMPT_LINK)
                    .table(SyncAttempt::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SyncAttempt::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SyncAttempt {
    Table,
    Id,
    OrganizationId,
    ProductId,
    ChannelId,
    RequestedPrice,
    RequestedStock,
    Outcome,
    Message,
    CreatedAt,
}
