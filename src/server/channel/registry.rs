use std::{collections::HashMap, sync::Arc, time::Duration};

use crate::server::{
    channel::{ChannelAdapter, RemoteListing},
    error::adapter::AdapterError,
    model::db::ChannelModel,
};

struct RegisteredAdapter {
    adapter: Arc<dyn ChannelAdapter>,
    timeout: Duration,
}

/// Routes pushes to the adapter registered for a channel's kind and bounds each call by the
/// kind's timeout.
pub struct AdapterRegistry {
    adapters: HashMap<String, RegisteredAdapter>,
    default_timeout: Duration,
}

impl AdapterRegistry {
    /// Create an empty registry; adapters registered without an explicit timeout use
    /// `default_timeout`.
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            adapters: HashMap::new(),
            default_timeout,
        }
    }

    /// Register `adapter` for channels of `kind`, replacing any previous registration.
    pub fn register(self, kind: impl Into<String>, adapter: Arc<dyn ChannelAdapter>) -> Self {
        let timeout = self.default_timeout;
        self.register_with_timeout(kind, adapter, timeout)
    }

    pub fn register_with_timeout(
        mut self,
        kind: impl Into<String>,
        adapter: Arc<dyn ChannelAdapter>,
        timeout: Duration,
    ) -> Self {
        self.adapters
            .insert(kind.into(), RegisteredAdapter { adapter, timeout });
        self
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.adapters.contains_key(kind)
    }

    /// Push a listing update through the adapter for `channel.kind`.
    ///
    /// # Returns
    /// - `Ok(RemoteListing)` - The channel confirmed the update
    /// - `Err(AdapterError)` with code `unsupported_channel` - No adapter for this kind
    /// - `Err(AdapterError)` with code `timeout` - The call exceeded the kind's timeout
    /// - `Err(AdapterError)` - Any failure reported by the adapter itself
    pub async fn push(
        &self,
        channel: &ChannelModel,
        remote_listing_id: Option<&str>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<RemoteListing, AdapterError> {
        let Some(registered) = self.adapters.get(&channel.kind) else {
            return Err(AdapterError::unsupported(&channel.kind));
        };

        match tokio::time::timeout(
            registered.timeout,
            registered
                .adapter
                .push(channel, remote_listing_id, price, stock),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    channel_id = %channel.id,
                    kind = %channel.kind,
                    timeout_ms = registered.timeout.as_millis() as u64,
                    "Channel adapter call timed out"
                );

                Err(AdapterError::timeout(registered.timeout))
            }
        }
    }
}
