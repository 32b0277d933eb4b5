//! Declarative test builder.
//!
//! The builder queues tables, fixtures and mock endpoints and creates all of them during the
//! final `build()` call, so a test reads as a description of the state it starts from.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_catalog_tables: bool,

    organizations: Vec<String>,
    products: Vec<(i32, String, f64)>, // (organization_id, code, price)
    channels: Vec<(i32, String)>,      // (organization_id, kind)

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_catalog_tables: false,
            organizations: Vec::new(),
            products: Vec::new(),
            channels: Vec::new(),
            mock_builders: Vec::new(),
        }
    }

    /// Add every table of the schema, in foreign key order.
    pub fn with_catalog_tables(mut self) -> Self {
        self.include_catalog_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use marketlink_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), marketlink_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Organization)
    ///     .with_table(CatalogProduct)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an organization. Organizations receive ids 1, 2, ... in the order they are queued.
    pub fn with_organization(mut self, name: impl Into<String>) -> Self {
        self.organizations.push(name.into());
        self
    }

    /// Insert a catalog product owned by `organization_id`.
    ///
    /// Products receive ids 1, 2, ... in the order they are queued.
    pub fn with_product(mut self, organization_id: i32, code: impl Into<String>, price: f64) -> Self {
        self.products.push((organization_id, code.into(), price));
        self
    }

    /// Insert an active sales channel owned by `organization_id`.
    ///
    /// The channel endpoint points at the context's mock server. Channels receive ids 1, 2, ...
    /// in the order they are queued.
    pub fn with_channel(mut self, organization_id: i32, kind: impl Into<String>) -> Self {
        self.channels.push((organization_id, kind.into()));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_catalog_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Organization),
                schema.create_table_from_entity(entity::prelude::CatalogProduct),
                schema.create_table_from_entity(entity::prelude::SalesChannel),
                schema.create_table_from_entity(entity::prelude::ListingLink),
                schema.create_table_from_entity(entity::prelude::SyncAttempt),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        for name in self.organizations {
            setup.catalog().insert_organization(&name).await?;
        }

        for (organization_id, code, price) in self.products {
            setup
                .catalog()
                .insert_product(organization_id, &code, price)
                .await?;
        }

        for (organization_id, kind) in self.channels {
            setup.catalog().insert_channel(organization_id, &kind).await?;
        }

        let mut mocks = Vec::new();
        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
