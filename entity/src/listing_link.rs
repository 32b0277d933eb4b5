use sea_orm::entity::prelude::*;

/// Synchronization state of a listing on an external channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SyncStatus {
    /// Row exists but no remote listing has been confirmed yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Remote listing known and the last push succeeded.
    #[sea_orm(string_value = "active")]
    Active,
    /// Remote listing known but the last push failed.
    #[sea_orm(string_value = "error")]
    Error,
    /// Soft-deactivated, kept for audit history.
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listing_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub organization_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: i32,
    pub remote_listing_id: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub status: SyncStatus,
    pub last_error: Option<String>,
    pub last_attempt_at: Option<DateTime>,
    pub last_success_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Organization,
    #[sea_orm(
        belongs_to = "super::catalog_product::Entity",
        from = "Column::ProductId",
        to = "super::catalog_product::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CatalogProduct,
    #[sea_orm(
        belongs_to = "super::sales_channel::Entity",
        from = "Column::ChannelId",
        to = "super::sales_channel::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SalesChannel,
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::catalog_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CatalogProduct.def()
    }
}

impl Related<super::sales_channel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesChannel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
