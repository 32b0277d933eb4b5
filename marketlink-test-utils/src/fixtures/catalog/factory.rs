//! Factory functions for in-memory test values.
//!
//! Pure functions without database interaction, used to build bulk input rows and
//! remote channel payloads.

use std::collections::HashMap;

/// Build a spreadsheet-style record from `(header, value)` pairs.
pub fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(header, value)| (header.to_string(), value.to_string()))
        .collect()
}

/// Build a record with the default English `code` and `price` headers.
pub fn price_record(code: &str, price: &str) -> HashMap<String, String> {
    record(&[("code", code), ("price", price)])
}

/// JSON body a channel returns after accepting a listing update.
pub fn remote_listing_body(remote_listing_id: &str, price: f64, stock: Option<i32>) -> String {
    serde_json::json!({
        "id": remote_listing_id,
        "price": price,
        "stock": stock,
    })
    .to_string()
}
