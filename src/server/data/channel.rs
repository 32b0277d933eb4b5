use chrono::Utc;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct ChannelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ChannelRepository<'a, C> {
    /// Creates a new instance of [`ChannelRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a channel by id, restricted to channels owned by `organization_id`.
    pub async fn find_owned(
        &self,
        organization_id: i32,
        channel_id: i32,
    ) -> Result<Option<entity::sales_channel::Model>, DbErr> {
        entity::prelude::SalesChannel::find_by_id(channel_id)
            .filter(entity::sales_channel::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await
    }

    /// Disable a channel owned by `organization_id`.
    ///
    /// # Returns
    /// - `Ok(true)` - The channel was active and is now disabled
    /// - `Ok(false)` - No such channel for the organization, or already disabled
    pub async fn deactivate(&self, organization_id: i32, channel_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SalesChannel::update_many()
            .set(entity::sales_channel::ActiveModel {
                is_active: ActiveValue::Set(false),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::sales_channel::Column::Id.eq(channel_id))
            .filter(entity::sales_channel::Column::OrganizationId.eq(organization_id))
            .filter(entity::sales_channel::Column::IsActive.eq(true))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
