use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for a single-item listing update
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PushPriceDto {
    /// New price to publish on the channel
    pub price: f64,
    /// Optional stock quantity to publish alongside the price
    #[serde(default)]
    pub stock: Option<i32>,
}

/// Request body for a bulk update
#[derive(Serialize, Deserialize, ToSchema)]
pub struct BatchRequestDto {
    /// Channels every row is pushed to
    pub channel_ids: Vec<i32>,
    /// Spreadsheet rows keyed by column header, headers may use any supported alias
    pub rows: Vec<HashMap<String, serde_json::Value>>,
}

/// One failed row or channel of a bulk update
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct BatchFailureDto {
    /// Zero-based index of the input row, absent for channel-level failures
    pub row: Option<usize>,
    /// Product code of the row, if one could be read
    pub code: Option<String>,
    /// Channel the failure applies to, absent when the row failed before any push
    pub channel_id: Option<i32>,
    /// Human readable reason
    pub reason: String,
    /// Whether retrying the row later may succeed
    pub retryable: bool,
}

/// Result of a bulk update
#[derive(Serialize, Deserialize, ToSchema)]
pub struct BatchResultDto {
    /// Number of successful (row, channel) pushes
    pub succeeded: usize,
    /// Number of reported failures
    pub failed: usize,
    /// Failure details, by row code and channel
    pub failures: Vec<BatchFailureDto>,
}

/// A product's listing on one channel
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ListingLinkDto {
    pub product_id: i32,
    pub channel_id: i32,
    /// Identifier assigned by the channel, absent until the first successful push
    pub remote_listing_id: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    /// One of `pending`, `active`, `error`, `inactive`
    pub status: String,
    pub last_error: Option<String>,
    pub last_attempt_at: Option<NaiveDateTime>,
    pub last_success_at: Option<NaiveDateTime>,
}

/// One recorded synchronization attempt
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct SyncAttemptDto {
    pub id: i32,
    pub product_id: i32,
    pub channel_id: i32,
    pub requested_price: Option<f64>,
    pub requested_stock: Option<i32>,
    /// One of `success`, `adapter_error`, `rate_limited`
    pub outcome: String,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Result of deactivating a channel's listings
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeactivateResultDto {
    /// Number of links marked inactive
    pub deactivated: u64,
}
