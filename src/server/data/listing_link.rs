use chrono::Utc;
use entity::listing_link::SyncStatus;
use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

/// Outcome of a push, as written to the link row.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkUpdate {
    /// The channel confirmed the listing state.
    Confirmed {
        remote_listing_id: String,
        price: f64,
        /// `None` leaves the stored stock unchanged
        stock: Option<i32>,
    },
    /// The push failed; only status, error and attempt timestamp change.
    Failed { status: SyncStatus, message: String },
}

pub struct ListingLinkRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ListingLinkRepository<'a, C> {
    /// Creates a new instance of [`ListingLinkRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Insert or update the link for `(organization_id, product_id, channel_id)`.
    ///
    /// Runs as a single `INSERT .. ON CONFLICT DO UPDATE` on the composite primary key, so
    /// concurrent upserts for one triple never produce two rows; the last statement to run
    /// determines the stored values.
    ///
    /// A [`LinkUpdate::Failed`] never touches `remote_listing_id`, price or stock of an
    /// existing row.
    pub async fn upsert(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
        update: LinkUpdate,
    ) -> Result<entity::listing_link::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut link = entity::listing_link::ActiveModel {
            organization_id: ActiveValue::Set(organization_id),
            product_id: ActiveValue::Set(product_id),
            channel_id: ActiveValue::Set(channel_id),
            remote_listing_id: ActiveValue::Set(None),
            price: ActiveValue::Set(None),
            stock: ActiveValue::Set(None),
            status: ActiveValue::Set(SyncStatus::Pending),
            last_error: ActiveValue::Set(None),
            last_attempt_at: ActiveValue::Set(Some(now)),
            last_success_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let mut update_columns = vec![
            entity::listing_link::Column::Status,
            entity::listing_link::Column::LastError,
            entity::listing_link::Column::LastAttemptAt,
            entity::listing_link::Column::UpdatedAt,
        ];

        match update {
            LinkUpdate::Confirmed {
                remote_listing_id,
                price,
                stock,
            } => {
                link.remote_listing_id = ActiveValue::Set(Some(remote_listing_id));
                link.price = ActiveValue::Set(Some(price));
                link.status = ActiveValue::Set(SyncStatus::Active);
                link.last_success_at = ActiveValue::Set(Some(now));

                update_columns.extend([
                    entity::listing_link::Column::RemoteListingId,
                    entity::listing_link::Column::Price,
                    entity::listing_link::Column::LastSuccessAt,
                ]);

                if stock.is_some() {
                    link.stock = ActiveValue::Set(stock);
                    update_columns.push(entity::listing_link::Column::Stock);
                }
            }
            LinkUpdate::Failed { status, message } => {
                link.status = ActiveValue::Set(status);
                link.last_error = ActiveValue::Set(Some(message));
            }
        }

        entity::prelude::ListingLink::insert(link)
            .on_conflict(
                OnConflict::columns([
                    entity::listing_link::Column::OrganizationId,
                    entity::listing_link::Column::ProductId,
                    entity::listing_link::Column::ChannelId,
                ])
                .update_columns(update_columns)
                .to_owned(),
            )
            .exec_with_returning(self.db)
            .await
    }

    /// Get every link row for a product and channel, regardless of organization.
    ///
    /// Only used after the caller's ownership of the product has been verified, to detect rows
    /// whose organization disagrees with it.
    pub async fn find_by_product_channel(
        &self,
        product_id: i32,
        channel_id: i32,
    ) -> Result<Vec<entity::listing_link::Model>, DbErr> {
        entity::prelude::ListingLink::find()
            .filter(entity::listing_link::Column::ProductId.eq(product_id))
            .filter(entity::listing_link::Column::ChannelId.eq(channel_id))
            .all(self.db)
            .await
    }

    /// Get every link row for a product, regardless of organization.
    pub async fn find_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<entity::listing_link::Model>, DbErr> {
        entity::prelude::ListingLink::find()
            .filter(entity::listing_link::Column::ProductId.eq(product_id))
            .all(self.db)
            .await
    }

    /// Mark every link of the organization's channel inactive.
    ///
    /// Remote ids, prices and audit history are kept. Returns the number of rows changed;
    /// links already inactive are not counted.
    pub async fn deactivate_by_channel(
        &self,
        organization_id: i32,
        channel_id: i32,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::ListingLink::update_many()
            .set(entity::listing_link::ActiveModel {
                status: ActiveValue::Set(SyncStatus::Inactive),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .filter(entity::listing_link::Column::OrganizationId.eq(organization_id))
            .filter(entity::listing_link::Column::ChannelId.eq(channel_id))
            .filter(entity::listing_link::Column::Status.ne(SyncStatus::Inactive))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Clear the remote listing id of a link and mark it inactive.
    ///
    /// # Returns
    /// - `Ok(Some(model))` - The updated link
    /// - `Ok(None)` - No link exists for the triple
    pub async fn delink(
        &self,
        organization_id: i32,
        product_id: i32,
        channel_id: i32,
    ) -> Result<Option<entity::listing_link::Model>, DbErr> {
        let link = match entity::prelude::ListingLink::find_by_id((
            organization_id,
            product_id,
            channel_id,
        ))
        .one(self.db)
        .await?
        {
            Some(link) => link,
            None => return Ok(None),
        };

        let mut link_am = link.into_active_model();
        link_am.remote_listing_id = ActiveValue::Set(None);
        link_am.status = ActiveValue::Set(SyncStatus::Inactive);
        link_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let link = link_am.update(self.db).await?;

        Ok(Some(link))
    }
}
