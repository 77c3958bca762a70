//! Local-store vault backend: hierarchical, encrypted.
//!
//! Values are encrypted with the [`EncryptionKeyRing`] before they touch the
//! database, so the storage medium never holds plaintext. Keys form an
//! implicit tree: writing `a/b/c` materializes placeholder entries for `a`
//! and `a/b` (value NULL) so every entry's parent exists without the caller
//! ever issuing a "create directory" call.

use super::{EncryptionKeyRing, KeyPath, SecretString, Vault};
use crate::errors::{Result, VaultError};
use crate::storage::DbPool;
use async_trait::async_trait;
use tracing::debug;

/// Vault backend persisting encrypted values in the relational store.
///
/// Encryption and decryption happen only here; no other backend encrypts.
#[derive(Debug, Clone)]
pub struct DatabaseVault {
    pool: DbPool,
    keyring: EncryptionKeyRing,
}

impl DatabaseVault {
    /// Create a database vault over an existing pool.
    pub fn new(pool: DbPool, keyring: EncryptionKeyRing) -> Self {
        Self { pool, keyring }
    }

    /// Materialize the key's missing ancestors, root first.
    ///
    /// Each level is its own atomic `INSERT ... ON CONFLICT DO NOTHING`, so
    /// two concurrent writers under a not-yet-created shared ancestor both
    /// succeed instead of racing an insert-only statement. Placeholders
    /// carry a NULL value and a reference to their own parent.
    async fn ensure_ancestors(&self, key: &KeyPath) -> Result<()> {
        for ancestor in key.ancestors() {
            let parent = ancestor.parent();
            sqlx::query(
                "INSERT INTO vault_entries (key, encrypted_value, parent_key)
                 VALUES ($1, NULL, $2)
                 ON CONFLICT(key) DO NOTHING",
            )
            .bind(ancestor.as_str())
            .bind(parent.as_ref().map(KeyPath::as_str))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                VaultError::database(
                    e,
                    format!("Failed to create placeholder entry '{}'", ancestor),
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Vault for DatabaseVault {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        let key = KeyPath::parse(key)?;
        debug!(key = %key, "Reading secret from database");

        let stored: Option<Option<Vec<u8>>> =
            sqlx::query_scalar("SELECT encrypted_value FROM vault_entries WHERE key = $1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    VaultError::database(e, format!("Failed to read secret '{}'", key))
                })?;

        // No row, or a placeholder ancestor row: both are absence.
        let Some(Some(token)) = stored else {
            return Ok(None);
        };

        let plaintext = self.keyring.decrypt(&token)?;
        let value = String::from_utf8(plaintext)
            .map_err(|e| VaultError::internal(format!("Invalid UTF-8 in decrypted secret: {}", e)))?;

        Ok(Some(SecretString::new(value)))
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        let key = KeyPath::parse(key)?;
        debug!(key = %key, "Writing secret to database");

        // Empty values are real writes; they encrypt and overwrite like any
        // other value.
        let token = self.keyring.encrypt(value.as_bytes())?;

        self.ensure_ancestors(&key).await?;

        let parent = key.parent();
        sqlx::query(
            "INSERT INTO vault_entries (key, encrypted_value, parent_key)
             VALUES ($1, $2, $3)
             ON CONFLICT(key) DO UPDATE SET encrypted_value = excluded.encrypted_value",
        )
        .bind(key.as_str())
        .bind(&token)
        .bind(parent.as_ref().map(KeyPath::as_str))
        .execute(&self.pool)
        .await
        .map_err(|e| VaultError::database(e, format!("Failed to write secret '{}'", key)))?;

        Ok(())
    }
}
