//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications, and Swagger UI is
//! served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/products/{product_id}/channels/{channel_id}/price` - Push price and stock
/// - `GET /api/products/{product_id}/channels/{channel_id}/link` - Get one listing
/// - `DELETE /api/products/{product_id}/channels/{channel_id}/link` - Detach a listing
/// - `GET /api/products/{product_id}/links` - Get every listing of a product
/// - `GET /api/products/{product_id}/attempts` - Get synchronization attempts
/// - `POST /api/sync/batch` - Push spreadsheet rows to channels
/// - `POST /api/channels/{channel_id}/deactivate` - Deactivate a channel's listings
///
/// Every endpoint requires the `x-organization-id` header set by the upstream auth layer.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, limiter, adapters };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Marketlink", description = "Marketplace listing synchronization API"), tags(
        (name = controller::listing::LISTING_TAG, description = "Product listings on sales channels"),
        (name = controller::sync::SYNC_TAG, description = "Bulk synchronization"),
        (name = controller::channel::CHANNEL_TAG, description = "Sales channel management"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::listing::push_price))
        .routes(routes!(
            controller::listing::get_link,
            controller::listing::delink
        ))
        .routes(routes!(controller::listing::get_product_links))
        .routes(routes!(controller::listing::get_product_attempts))
        .routes(routes!(controller::sync::push_batch))
        .routes(routes!(controller::channel::deactivate_channel))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
