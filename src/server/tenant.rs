//! Tenant context resolution.
//!
//! Authentication happens upstream. By the time a request reaches the engine the auth layer has
//! either stored a [`TenantContext`] in the request extensions or forwarded the organization id
//! in the `x-organization-id` header. Every core operation takes the resolved organization id;
//! nothing below this module derives it again.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use crate::server::error::{sync::SyncError, Error};

/// Header carrying the authenticated organization id.
pub static ORGANIZATION_HEADER: &str = "x-organization-id";

/// The organization a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    organization_id: i32,
}

impl TenantContext {
    pub fn new(organization_id: i32) -> Self {
        Self { organization_id }
    }

    pub fn organization_id(&self) -> i32 {
        self.organization_id
    }
}

/// Resolve the organization from request headers.
///
/// # Returns
/// - `Ok(TenantContext)` - Header present and a positive integer
/// - `Err(SyncError::Unauthorized)` - Header missing, not valid UTF-8, or not a valid id
pub fn resolve_organization(headers: &HeaderMap) -> Result<TenantContext, SyncError> {
    let value = headers
        .get(ORGANIZATION_HEADER)
        .ok_or(SyncError::Unauthorized)?
        .to_str()
        .map_err(|_| SyncError::Unauthorized)?;

    match value.trim().parse::<i32>() {
        Ok(organization_id) if organization_id > 0 => Ok(TenantContext::new(organization_id)),
        _ => Err(SyncError::Unauthorized),
    }
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<TenantContext>() {
            return Ok(*context);
        }

        let context = resolve_organization(&parts.headers)?;

        Ok(context)
    }
}
