//! Null vault backend.

use super::{SecretString, Vault};
use crate::errors::{Result, VaultError};
use async_trait::async_trait;

/// Backend used when no vault configuration is supplied.
///
/// Every operation fails with [`VaultError::NotConfigured`], so the rest of
/// the system can always obtain *a* vault instance and the failure is
/// deferred to first use rather than startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVault;

#[async_trait]
impl Vault for NullVault {
    async fn read_secret(&self, _key: &str) -> Result<Option<SecretString>> {
        Err(VaultError::NotConfigured)
    }

    async fn write_secret(&self, _key: &str, _value: &str) -> Result<()> {
        Err(VaultError::NotConfigured)
    }
}
