//! Database connection management for the local-store backend.

pub mod migrations;
pub mod pool;

pub use migrations::ensure_schema;
pub use pool::{create_pool, DatabaseConfig, DbPool};
