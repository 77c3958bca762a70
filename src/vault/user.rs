//! Per-user namespace wrapper.

use super::{SecretString, Vault};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Rewrites every key under a per-user `user/<id>/` subtree before
/// delegating.
///
/// Two different user ids can never observe or overwrite each other's
/// entries through this wrapper, provided the wrapped vault enforces
/// exact-key semantics.
#[derive(Debug, Clone)]
pub struct UserVaultWrapper {
    inner: Arc<dyn Vault>,
    user_id: i64,
}

impl UserVaultWrapper {
    /// Wrap a vault instance, scoping keys to `user_id`.
    pub fn new(inner: Arc<dyn Vault>, user_id: i64) -> Self {
        Self { inner, user_id }
    }

    fn scoped(&self, key: &str) -> String {
        format!("user/{}/{}", self.user_id, key)
    }
}

#[async_trait]
impl Vault for UserVaultWrapper {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        self.inner.read_secret(&self.scoped(key)).await
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        self.inner.write_secret(&self.scoped(key), value).await
    }
}
