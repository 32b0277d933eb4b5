//! Server application models and type definitions.
//!
//! Application state shared by HTTP handlers and aliases for the SeaORM models used across
//! the repositories and services.

pub mod app;
pub mod db;
