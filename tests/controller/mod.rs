//! Tests for the HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors, and through the router where header
//! extraction and routing are under test.

mod sync;

use axum::{body::to_bytes, http::StatusCode, response::Response};
use marketlink_test_utils::{constant::TEST_CHANNEL_KIND, prelude::*};
use serde::de::DeserializeOwned;

use crate::util::{test_state, DEFAULT_TEST_RATE_LIMIT};

/// Read a JSON response body.
async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
