//! Shared helpers for vault integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use base64::Engine;
use strongroom::storage::{create_pool, DatabaseConfig, DbPool};

/// Single-connection in-memory pool. SQLite gives every connection its own
/// in-memory database, so tests sharing state must not exceed one.
pub async fn memory_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite://:memory:".to_string(),
        max_connections: 1,
        ..Default::default()
    };
    create_pool(&config).await.expect("create in-memory pool")
}

/// File-backed pool for tests that need real connection concurrency.
pub async fn file_pool(path: &std::path::Path) -> DbPool {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 4,
        ..Default::default()
    };
    create_pool(&config).await.expect("create file-backed pool")
}

/// A base64-encoded 32-byte key filled with `fill`.
pub fn encoded_key(fill: u8) -> String {
    base64::engine::general_purpose::STANDARD.encode([fill; 32])
}
