use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organization")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::catalog_product::Entity")]
    CatalogProduct,
    #[sea_orm(has_many = "super::sales_channel::Entity")]
    SalesChannel,
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
