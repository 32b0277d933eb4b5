use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::ActiveEnum;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        listing::{ListingLinkDto, PushPriceDto, SyncAttemptDto},
    },
    server::{
        error::{
            sync::{Resource, SyncError},
            Error,
        },
        model::{
            app::AppState,
            db::{ListingLinkModel, SyncAttemptModel},
        },
        tenant::TenantContext,
    },
};

pub static LISTING_TAG: &str = "listing";

#[derive(Deserialize, IntoParams)]
pub struct AttemptQuery {
    /// Only return attempts against this channel
    pub channel_id: Option<i32>,
}

impl From<ListingLinkModel> for ListingLinkDto {
    fn from(link: ListingLinkModel) -> Self {
        Self {
            product_id: link.product_id,
            channel_id: link.channel_id,
            remote_listing_id: link.remote_listing_id,
            price: link.price,
            stock: link.stock,
            status: link.status.to_value(),
            last_error: link.last_error,
            last_attempt_at: link.last_attempt_at,
            last_success_at: link.last_success_at,
        }
    }
}

impl From<SyncAttemptModel> for SyncAttemptDto {
    fn from(attempt: SyncAttemptModel) -> Self {
        Self {
            id: attempt.id,
            product_id: attempt.product_id,
            channel_id: attempt.channel_id,
            requested_price: attempt.requested_price,
            requested_stock: attempt.requested_stock,
            outcome: attempt.outcome.to_value(),
            message: attempt.message,
            created_at: attempt.created_at,
        }
    }
}

/// Push a new price, and optionally stock, for a product to one channel
#[utoipa::path(
    post,
    path = "/api/products/{product_id}/channels/{channel_id}/price",
    tag = LISTING_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("product_id" = i32, Path, description = "Catalog product ID"),
        ("channel_id" = i32, Path, description = "Sales channel ID"),
    ),
    request_body = PushPriceDto,
    responses(
        (status = 200, description = "Channel confirmed the update", body = ListingLinkDto),
        (status = 400, description = "Negative or non-finite price, or negative stock", body = ErrorDto),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Product or channel not found", body = ErrorDto),
        (status = 409, description = "Channel is inactive", body = ErrorDto),
        (status = 429, description = "Channel is rate limited, retry later", body = ErrorDto),
        (status = 502, description = "Channel rejected the update", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn push_price(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path((product_id, channel_id)): Path<(i32, i32)>,
    Json(payload): Json<PushPriceDto>,
) -> Result<impl IntoResponse, Error> {
    let link = state
        .pipeline()
        .push_listing(
            tenant.organization_id(),
            product_id,
            channel_id,
            payload.price,
            payload.stock,
        )
        .await?;

    Ok((StatusCode::OK, Json(ListingLinkDto::from(link))))
}

/// Get every channel listing of a product
#[utoipa::path(
    get,
    path = "/api/products/{product_id}/links",
    tag = LISTING_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("product_id" = i32, Path, description = "Catalog product ID"),
    ),
    responses(
        (status = 200, description = "Listings of the product", body = Vec<ListingLinkDto>),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product_links(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let links = state
        .pipeline()
        .list_links_for_product(tenant.organization_id(), product_id)
        .await?;

    let link_dtos: Vec<ListingLinkDto> = links.into_iter().map(Into::into).collect();

    Ok((StatusCode::OK, Json(link_dtos)))
}

/// Get a product's listing on one channel
#[utoipa::path(
    get,
    path = "/api/products/{product_id}/channels/{channel_id}/link",
    tag = LISTING_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("product_id" = i32, Path, description = "Catalog product ID"),
        ("channel_id" = i32, Path, description = "Sales channel ID"),
    ),
    responses(
        (status = 200, description = "The listing", body = ListingLinkDto),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Product, channel or listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_link(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path((product_id, channel_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let link = state
        .pipeline()
        .find_link(tenant.organization_id(), product_id, channel_id)
        .await?
        .ok_or(SyncError::NotFound(Resource::Link))?;

    Ok((StatusCode::OK, Json(ListingLinkDto::from(link))))
}

/// Detach a product from its remote listing on one channel
///
/// Clears the remote listing id and marks the link inactive. The next push creates a new
/// remote listing.
#[utoipa::path(
    delete,
    path = "/api/products/{product_id}/channels/{channel_id}/link",
    tag = LISTING_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("product_id" = i32, Path, description = "Catalog product ID"),
        ("channel_id" = i32, Path, description = "Sales channel ID"),
    ),
    responses(
        (status = 200, description = "Listing detached", body = ListingLinkDto),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Product, channel or listing not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delink(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path((product_id, channel_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let link = state
        .pipeline()
        .delink(tenant.organization_id(), product_id, channel_id)
        .await?;

    Ok((StatusCode::OK, Json(ListingLinkDto::from(link))))
}

/// Get the synchronization attempts of a product, newest first
#[utoipa::path(
    get,
    path = "/api/products/{product_id}/attempts",
    tag = LISTING_TAG,
    params(
        ("x-organization-id" = i32, Header, description = "Authenticated organization"),
        ("product_id" = i32, Path, description = "Catalog product ID"),
        AttemptQuery,
    ),
    responses(
        (status = 200, description = "Recorded attempts", body = Vec<SyncAttemptDto>),
        (status = 401, description = "Missing organization context", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product_attempts(
    State(state): State<AppState>,
    tenant: TenantContext,
    Path(product_id): Path<i32>,
    Query(query): Query<AttemptQuery>,
) -> Result<impl IntoResponse, Error> {
    let attempts = state
        .pipeline()
        .list_attempts(tenant.organization_id(), product_id, query.channel_id)
        .await?;

    let attempt_dtos: Vec<SyncAttemptDto> = attempts.into_iter().map(Into::into).collect();

    Ok((StatusCode::OK, Json(attempt_dtos)))
}
