//! Schema management for the vault store.
//!
//! The vault owns a single table, so the schema is embedded and applied
//! idempotently at pool creation instead of going through a filesystem
//! migration runner.

use crate::errors::{Result, VaultError};
use crate::storage::DbPool;
use tracing::debug;

/// One row per key. `encrypted_value` is NULL for placeholder ancestor
/// entries that exist only to anchor their descendants. `parent_key` is
/// maintained procedurally at write time, not by a foreign-key constraint.
const VAULT_ENTRIES_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS vault_entries (
    key             TEXT PRIMARY KEY,
    encrypted_value BLOB,
    parent_key      TEXT
)
"#;

/// Create the vault schema if it does not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(VAULT_ENTRIES_DDL)
        .execute(pool)
        .await
        .map_err(|e| VaultError::database(e, "Failed to create vault_entries table"))?;

    debug!("Vault schema ensured");
    Ok(())
}
