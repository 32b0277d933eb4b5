use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use marketlink::server::{
    channel::{ChannelAdapter, RemoteListing},
    error::adapter::AdapterError,
    model::db::ChannelModel,
};

/// One call received by [`MockChannelAdapter`].
#[derive(Debug, Clone, PartialEq)]
pub struct PushCall {
    pub channel_id: i32,
    pub remote_listing_id: Option<String>,
    pub price: f64,
    pub stock: Option<i32>,
}

enum Scripted {
    Fail(AdapterError),
    Delay(Duration),
}

/// Channel adapter that confirms every push unless a failure was scripted.
///
/// New listings receive the id `remote-{channel_id}-{call}`; updates keep the id they were
/// called with.
pub struct MockChannelAdapter {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<PushCall>>,
}

impl MockChannelAdapter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Fail the next call with `code`.
    pub fn fail_next(&self, code: &str, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(AdapterError::new(code, message)));
    }

    /// Sleep before answering the next call.
    pub fn delay_next(&self, delay: Duration) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Delay(delay));
    }

    pub fn calls(&self) -> Vec<PushCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelAdapter for MockChannelAdapter {
    async fn push(
        &self,
        channel: &ChannelModel,
        remote_listing_id: Option<&str>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<RemoteListing, AdapterError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(PushCall {
                channel_id: channel.id,
                remote_listing_id: remote_listing_id.map(str::to_string),
                price,
                stock,
            });
            calls.len()
        };

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Fail(err)) => return Err(err),
            Some(Scripted::Delay(delay)) => tokio::time::sleep(delay).await,
            None => {}
        }

        Ok(RemoteListing {
            remote_listing_id: remote_listing_id
                .map(str::to_string)
                .unwrap_or_else(|| format!("remote-{}-{}", channel.id, call_number)),
            confirmed_price: price,
            confirmed_stock: stock,
        })
    }
}
