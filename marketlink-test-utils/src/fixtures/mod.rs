//! Test fixture modules for database record creation.
//!
//! - `catalog` - organizations, catalog products, sales channels and listing links
pub mod catalog;
