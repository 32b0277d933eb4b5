use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::{
    model::{
        api::ErrorDto,
        listing::{BatchRequestDto, BatchResultDto},
    },
    server::{error::Error, model::app::AppState, tenant::TenantContext},
};

pub static SYNC_TAG: &str = "sync";

/// Flatten a JSON row into header to text pairs; null cells are treated as absent.
fn record_from_json(row: HashMap<String, Value>) -> HashMap<String, String> {
    row.into_iter()
        .filter_map(|(header, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((header, text)),
            other => Some((header, other.to_string())),
        })
        .collect()
}

/// Push spreadsheet rows to one or more channels
///
/// Rows are processed independently. The response reports how many pushes succeeded and
/// which rows failed and why; a 200 response does not mean every row succeeded.
#[utoipa::path(
    post,
    path = "/api/sync/batch",
    tag = SYNC_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
    ),
    request_body = BatchRequestDto,
    responses(
        (status = 200, description = "Batch processed, see failures for rejected rows", body = BatchResultDto),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 500, description = "Internal server error or tenant isolation defect", body = ErrorDto)
    ),
)]
pub async fn push_batch(
    State(state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<BatchRequestDto>,
) -> Result<impl IntoResponse, Error> {
    let records: Vec<HashMap<String, String>> =
        payload.rows.into_iter().map(record_from_json).collect();

    let outcome = state
        .pipeline()
        .push_records(tenant.organization_id(), &payload.channel_ids, &records)
        .await?;

    Ok((StatusCode::OK, Json(BatchResultDto::from(outcome))))
}
