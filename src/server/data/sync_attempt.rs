use chrono::Utc;
use entity::sync_attempt::SyncOutcome;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Values of one synchronization attempt to append.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSyncAttempt {
    pub organization_id: i32,
    pub product_id: i32,
    pub channel_id: i32,
    pub requested_price: Option<f64>,
    pub requested_stock: Option<i32>,
    pub outcome: SyncOutcome,
    pub message: Option<String>,
}

pub struct SyncAttemptRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SyncAttemptRepository<'a, C> {
    /// Creates a new instance of [`SyncAttemptRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Append an attempt. Attempts are never updated or deleted.
    pub async fn create(
        &self,
        attempt: NewSyncAttempt,
    ) -> Result<entity::sync_attempt::Model, DbErr> {
        let attempt = entity::sync_attempt::ActiveModel {
            organization_id: ActiveValue::Set(attempt.organization_id),
            product_id: ActiveValue::Set(attempt.product_id),
            channel_id: ActiveValue::Set(attempt.channel_id),
            requested_price: ActiveValue::Set(attempt.requested_price),
            requested_stock: ActiveValue::Set(attempt.requested_stock),
            outcome: ActiveValue::Set(attempt.outcome),
            message: ActiveValue::Set(attempt.message),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        attempt.insert(self.db).await
    }

    /// Get the organization's attempts for a product, newest first, optionally narrowed to one
    /// channel.
    pub async fn find_for_link(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: Option<i32>,
    ) -> Result<Vec<entity::sync_attempt::Model>, DbErr> {
        let mut query = entity::prelude::SyncAttempt::find()
            .filter(entity::sync_attempt::Column::OrganizationId.eq(organization_id))
            .filter(entity::sync_attempt::Column::ProductId.eq(product_id));

        if let Some(channel_id) = channel_id {
            query = query.filter(entity::sync_attempt::Column::ChannelId.eq(channel_id));
        }

        query
            .order_by_desc(entity::sync_attempt::Column::Id)
            .all(self.db)
            .await
    }
}
