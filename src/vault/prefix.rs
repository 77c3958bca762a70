//! Instance-wide key prefix decorator.

use super::{SecretString, Vault};
use crate::errors::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Rewrites every key under a fixed, configuration-supplied root segment,
/// typically the deployment or instance identity.
///
/// Applied once, globally, beneath the validation decorator: validation
/// sees the caller's unprefixed key, prefixing happens after validation
/// passes.
#[derive(Debug, Clone)]
pub struct VaultKeyPrefixDecorator {
    inner: Arc<dyn Vault>,
    prefix: String,
}

impl VaultKeyPrefixDecorator {
    /// Wrap a vault instance, rewriting keys under `prefix`. Surrounding
    /// separators on the prefix are stripped at construction.
    pub fn new(inner: Arc<dyn Vault>, prefix: &str) -> Self {
        Self { inner, prefix: prefix.trim_matches('/').to_string() }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}/{}", self.prefix, key)
    }
}

#[async_trait]
impl Vault for VaultKeyPrefixDecorator {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        self.inner.read_secret(&self.prefixed(key)).await
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        self.inner.write_secret(&self.prefixed(key), value).await
    }
}
