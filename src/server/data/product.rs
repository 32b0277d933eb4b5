use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    /// Creates a new instance of [`ProductRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a product by id, restricted to products owned by `organization_id`.
    ///
    /// Returns `Ok(None)` both when the id does not exist and when it belongs to another
    /// organization.
    pub async fn find_owned(
        &self,
        organization_id: i32,
        product_id: i32,
    ) -> Result<Option<entity::catalog_product::Model>, DbErr> {
        entity::prelude::CatalogProduct::find_by_id(product_id)
            .filter(entity::catalog_product::Column::OrganizationId.eq(organization_id))
            .one(self.db)
            .await
    }

    /// Find a product by its tenant-scoped code.
    pub async fn find_by_code(
        &self,
        organization_id: i32,
        code: &str,
    ) -> Result<Option<entity::catalog_product::Model>, DbErr> {
        entity::prelude::CatalogProduct::find()
            .filter(entity::catalog_product::Column::OrganizationId.eq(organization_id))
            .filter(entity::catalog_product::Column::Code.eq(code))
            .one(self.db)
            .await
    }

    /// Find a product by barcode within `organization_id`.
    ///
    /// Barcodes are not unique; the first match is returned.
    pub async fn find_by_barcode(
        &self,
        organization_id: i32,
        barcode: &str,
    ) -> Result<Option<entity::catalog_product::Model>, DbErr> {
        entity::prelude::CatalogProduct::find()
            .filter(entity::catalog_product::Column::OrganizationId.eq(organization_id))
            .filter(entity::catalog_product::Column::Barcode.eq(barcode))
            .one(self.db)
            .await
    }
}
