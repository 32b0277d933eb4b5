use sea_orm::entity::prelude::*;

/// Result of a single synchronization call against a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SyncOutcome {
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "adapter_error")]
    AdapterError,
    #[sea_orm(string_value = "rate_limited")]
    RateLimited,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sync_attempt")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organization_id: i32,
    pub product_id: i32,
    pub channel_id: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub requested_price: Option<f64>,
    pub requested_stock: Option<i32>,
    pub outcome: SyncOutcome,
    pub message: Option<String>,
    pub created_at: DateTime,
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
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
