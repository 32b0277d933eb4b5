use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{api::ErrorDto, listing::DeactivateResultDto},
    server::{error::Error, model::app::AppState, tenant::TenantContext},
};

pub static CHANNEL_TAG: &str = "channel";

/// Disable a channel and mark every listing on it inactive
///
/// Used when a channel account is disabled. Remote listing ids and the audit trail are kept;
/// later pushes to the channel are refused with 409.
#[utoipa::path(
    post,
    path = "/api/channels/{channel_id}/deactivate",
    tag = CHANNEL_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("channel_id" = i32, Path, description = "Sales channel ID"),
    ),
    responses(
        (status = 200, description = "Listings deactivated", body = DeactivateResultDto),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Channel not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deactivate_channel(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(channel_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let deactivated = state
        .pipeline()
        .deactivate_channel(tenant.organization_id(), channel_id)
        .await?;

    Ok((StatusCode::OK, Json(DeactivateResultDto { deactivated })))
}
