use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    channel::{http::HttpChannelAdapter, AdapterRegistry},
    config::Config,
    error::Error,
    rate_limit::{RateLimiter, TokenBucketLimiter},
};

/// Channel kind served by the generic JSON adapter.
pub static HTTP_CHANNEL_KIND: &str = "http";

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the per-channel rate limiter shared by all requests of this process
pub fn build_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    Arc::new(TokenBucketLimiter::new(
        config.rate_limit,
        config.rate_limit_window,
    ))
}

/// Register the channel adapters available to the pipeline
pub fn build_adapters(config: &Config) -> Result<AdapterRegistry, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("marketlink/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::InternalError(format!("Failed to build HTTP client: {}", e)))?;

    let adapters = AdapterRegistry::new(config.adapter_timeout)
        .register(HTTP_CHANNEL_KIND, Arc::new(HttpChannelAdapter::new(client)));

    Ok(adapters)
}
