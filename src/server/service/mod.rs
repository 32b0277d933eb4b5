//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories, the rate limiter and channel adapters. Tenant isolation is
//! enforced here: the [`ownership`] gate is the only way to obtain an
//! [`Owned`](ownership::Owned) record, and every link registry mutation requires one.

pub mod audit;
pub mod ownership;
pub mod pipeline;
pub mod registry;
