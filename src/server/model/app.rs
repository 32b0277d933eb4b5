use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    channel::AdapterRegistry, rate_limit::RateLimiter, service::pipeline::SyncPipeline,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub limiter: Arc<dyn RateLimiter>,
    pub adapters: Arc<AdapterRegistry>,
}

impl AppState {
    /// Build a synchronization pipeline borrowing this state's collaborators.
    pub fn pipeline(&self) -> SyncPipeline<'_> {
        SyncPipeline::new(&self.db, self.limiter.as_ref(), self.adapters.as_ref())
    }
}
