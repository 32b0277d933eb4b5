//! HTTP controller endpoints for the marketlink web API.
//!
//! Axum handlers resolve the caller's organization through the
//! [`TenantContext`](crate::server::tenant::TenantContext) extractor, delegate to the
//! synchronization pipeline and map results to DTOs. utoipa annotations on every handler feed
//! the OpenAPI document served by the router.

pub mod channel;
pub mod listing;
pub mod sync;
