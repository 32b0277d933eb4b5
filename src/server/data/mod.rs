//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries for one table each and are generic over
//! [`sea_orm::ConnectionTrait`] so they run the same against a connection or a transaction.
//! Tenant scoping is part of every query predicate that takes an organization id; the few
//! reads that deliberately omit it exist so the link registry can detect rows that violate
//! tenant consistency.

pub mod channel;
pub mod listing_link;
pub mod product;
pub mod sync_attempt;
