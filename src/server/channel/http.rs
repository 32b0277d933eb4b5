//! Generic JSON-over-HTTP channel adapter.
//!
//! Speaks a minimal listing protocol against the channel's configured endpoint:
//! `POST {endpoint}/listings` to create, `PUT {endpoint}/listings/{id}` to update, with the
//! channel's API key as a bearer token. Channel kinds with their own wire format get their own
//! adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::server::{
    channel::{ChannelAdapter, RemoteListing},
    error::adapter::AdapterError,
    model::db::ChannelModel,
};

#[derive(Serialize)]
struct ListingPayload {
    price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    stock: Option<i32>,
}

#[derive(Deserialize)]
struct ListingResponse {
    id: String,
    price: f64,
    #[serde(default)]
    stock: Option<i32>,
}

pub struct HttpChannelAdapter {
    client: reqwest::Client,
}

impl HttpChannelAdapter {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpChannelAdapter {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// `{endpoint}/listings` or `{endpoint}/listings/{id}`, with the id escaped as one path segment.
fn listing_url(
    channel: &ChannelModel,
    remote_listing_id: Option<&str>,
) -> Result<reqwest::Url, AdapterError> {
    let endpoint = channel
        .endpoint_url
        .as_deref()
        .ok_or_else(|| AdapterError::new("misconfigured", "channel has no endpoint url"))?;

    let mut url = reqwest::Url::parse(endpoint)
        .map_err(|e| AdapterError::new("misconfigured", format!("invalid endpoint url: {}", e)))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AdapterError::new("misconfigured", "endpoint url cannot have a path"))?;
        segments.pop_if_empty().push("listings");
        if let Some(remote_listing_id) = remote_listing_id {
            segments.push(remote_listing_id);
        }
    }

    Ok(url)
}

#[async_trait]
impl ChannelAdapter for HttpChannelAdapter {
    async fn push(
        &self,
        channel: &ChannelModel,
        remote_listing_id: Option<&str>,
        price: f64,
        stock: Option<i32>,
    ) -> Result<RemoteListing, AdapterError> {
        let url = listing_url(channel, remote_listing_id)?;

        let mut request = match remote_listing_id {
            Some(_) => self.client.put(url),
            None => self.client.post(url),
        };

        if let Some(api_key) = channel.api_key.as_deref() {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .json(&ListingPayload { price, stock })
            .send()
            .await
            .map_err(AdapterError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::new(
                format!("http_{}", status.as_u16()),
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                },
            ));
        }

        let listing: ListingResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::new("invalid_response", e.to_string()))?;

        Ok(RemoteListing {
            remote_listing_id: listing.id,
            confirmed_price: listing.price,
            confirmed_stock: listing.stock,
        })
    }
}
