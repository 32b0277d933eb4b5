//! Server application core modules.
//!
//! Contains the synchronization engine and its HTTP surface: tenant resolution, ownership
//! verification, the link registry, the per-channel rate limiter, channel adapters and the
//! audit log, plus configuration, persistence and routing.

pub mod channel;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod router;
pub mod service;
pub mod startup;
pub mod tenant;
