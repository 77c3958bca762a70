//! Key validation decorator.

use super::{KeyPath, SecretString, Vault};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Outermost layer of the standard composition: normalizes and validates
/// the caller-supplied key before delegating, so malformed input never
/// reaches prefixing or storage.
///
/// Normalization is limited to trimming surrounding separators; anything
/// else that is malformed (doubled separators, whitespace next to a
/// separator, an empty key) is rejected, never silently corrected.
#[derive(Debug, Clone)]
pub struct VaultKeyValidationDecorator {
    inner: Arc<dyn Vault>,
}

impl VaultKeyValidationDecorator {
    /// Wrap a vault instance with key validation.
    pub fn new(inner: Arc<dyn Vault>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Vault for VaultKeyValidationDecorator {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        let key = KeyPath::parse(key)?;
        self.inner.read_secret(key.as_str()).await
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        let key = KeyPath::parse(key)?;
        self.inner.write_secret(key.as_str(), value).await
    }
}
