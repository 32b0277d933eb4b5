//! Bulk input rows and batch results.

use std::collections::HashMap;

use crate::{
    model::listing::{BatchFailureDto, BatchResultDto},
    server::error::{retry::ErrorRetryStrategy, sync::SyncError, Error},
};

/// Accepted headers for the product code, in priority order.
pub static CODE_HEADERS: &[&str] = &["code", "sku", "codigo", "código", "barcode", "ean"];
/// Accepted headers for the price, in priority order.
pub static PRICE_HEADERS: &[&str] = &["price", "preco", "preço", "precio", "prix"];
/// Accepted headers for the optional stock quantity, in priority order.
pub static STOCK_HEADERS: &[&str] = &["stock", "quantity", "qty", "estoque"];

/// One update request of a bulk import.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// Product code or barcode, resolved within the caller's organization
    pub code: String,
    pub price: f64,
    pub stock: Option<i32>,
}

impl BatchRow {
    pub fn new(code: impl Into<String>, price: f64) -> Self {
        Self {
            code: code.into(),
            price,
            stock: None,
        }
    }

    /// Read a row from a header to value mapping produced by a spreadsheet parser.
    ///
    /// Headers are matched case-insensitively after trimming; for each field the first alias
    /// with a non-empty value wins. Prices may use a decimal comma, thousands separators and
    /// a leading currency symbol (`R$ 1.234,50`).
    ///
    /// # Returns
    /// - `Ok(BatchRow)` - Code and price resolved
    /// - `Err(SyncError::InvalidRow)` - Code or price missing, or a value does not parse
    pub fn from_record(record: &HashMap<String, String>) -> Result<Self, SyncError> {
        let normalized: HashMap<String, &str> = record
            .iter()
            .map(|(header, value)| (header.trim().to_lowercase(), value.trim()))
            .collect();

        let lookup = |aliases: &[&str]| {
            aliases
                .iter()
                .filter_map(|alias| normalized.get(*alias).copied())
                .find(|value| !value.is_empty())
        };

        let code = lookup(CODE_HEADERS)
            .ok_or_else(|| SyncError::InvalidRow("no product code".to_string()))?;
        let price = lookup(PRICE_HEADERS)
            .ok_or_else(|| SyncError::InvalidRow(format!("no price for '{}'", code)))?;
        let price = parse_price(price).ok_or_else(|| {
            SyncError::InvalidRow(format!("invalid price '{}' for '{}'", price, code))
        })?;

        let stock = match lookup(STOCK_HEADERS) {
            Some(stock) => Some(parse_stock(stock).ok_or_else(|| {
                SyncError::InvalidRow(format!("invalid stock '{}' for '{}'", stock, code))
            })?),
            None => None,
        };

        Ok(Self {
            code: code.to_string(),
            price,
            stock,
        })
    }
}

/// Parse a locale formatted, non-negative price.
pub fn parse_price(value: &str) -> Option<f64> {
    let digits: String = value
        .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '-' || c == ',' || c == '.'))
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    // The right-most separator is the decimal one; the other is a thousands separator
    let normalized = match (digits.rfind(','), digits.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => digits.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => digits.replace(',', ""),
        (Some(_), None) => digits.replace(',', "."),
        _ => digits,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

fn parse_stock(value: &str) -> Option<i32> {
    let stock = match value.parse::<i32>() {
        Ok(stock) => Some(stock),
        // Spreadsheets often export integers as "12.0"
        Err(_) => value
            .parse::<f64>()
            .ok()
            .filter(|stock| stock.fract() == 0.0 && *stock <= i32::MAX as f64)
            .map(|stock| stock as i32),
    };

    stock.filter(|stock| *stock >= 0)
}

/// A row or channel that could not be synchronized.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Index of the input row, `None` for channel-level failures
    pub row: Option<usize>,
    pub code: Option<String>,
    pub channel_id: Option<i32>,
    pub reason: String,
    pub retryable: bool,
}

/// Accumulated result of a batch: successful pushes and reported failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Number of successful (row, channel) pushes
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Record a failure, or abort with the error if it is a tenant isolation defect.
    pub(crate) fn fail(
        &mut self,
        row: Option<usize>,
        code: Option<&str>,
        channel_id: Option<i32>,
        err: Error,
    ) -> Result<(), Error> {
        if err.is_invariant_violation() {
            return Err(err);
        }

        let reason = match err.as_sync_error() {
            Some(sync_error) => sync_error.to_string(),
            None => {
                tracing::error!(row = ?row, channel_id = ?channel_id, "Batch row failed: {}", err);

                "Internal server error".to_string()
            }
        };

        self.failures.push(BatchFailure {
            row,
            code: code.map(str::to_string),
            channel_id,
            reason,
            retryable: err.to_retry_strategy() == ErrorRetryStrategy::Retry,
        });

        Ok(())
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

impl From<BatchFailure> for BatchFailureDto {
    fn from(failure: BatchFailure) -> Self {
        Self {
            row: failure.row,
            code: failure.code,
            channel_id: failure.channel_id,
            reason: failure.reason,
            retryable: failure.retryable,
        }
    }
}

impl From<BatchOutcome> for BatchResultDto {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            succeeded: outcome.succeeded,
            failed: outcome.failed(),
            failures: outcome.failures.into_iter().map(Into::into).collect(),
        }
    }
}
