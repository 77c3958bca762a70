//! Vault construction and composition.

use super::{
    DatabaseVault, EncryptionKeyRing, FederatedVault, HashicorpVault, NullVault, Vault,
    VaultKeyPrefixDecorator, VaultKeyValidationDecorator,
};
use crate::config::{BackendSettings, VaultSettings};
use crate::errors::Result;
use crate::storage::DbPool;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the configured backend and composes it with the standard
/// decorator chain.
pub struct VaultFactory;

impl VaultFactory {
    /// Instance root used when the configuration supplies no `path_prefix`.
    pub const DEFAULT_PATH_PREFIX: &'static str = "/strongroom";

    /// Build a vault from parsed settings.
    ///
    /// The composition order is fixed and backend-independent:
    /// `validation(prefix(backend))`, so validation always sees the
    /// caller's unprefixed key.
    pub fn from_settings(settings: &VaultSettings, pool: &DbPool) -> Result<Arc<dyn Vault>> {
        let backend: Arc<dyn Vault> = match &settings.backend {
            BackendSettings::LocalStore { encryption_keys } => {
                let keyring = EncryptionKeyRing::new(encryption_keys)?;
                Arc::new(DatabaseVault::new(pool.clone(), keyring))
            }
            BackendSettings::RemoteKv(config) => Arc::new(HashicorpVault::new(config)?),
            BackendSettings::FederatedIdentity(config) => Arc::new(FederatedVault::new(config)?),
        };

        let prefix =
            settings.path_prefix.as_deref().unwrap_or(Self::DEFAULT_PATH_PREFIX);
        info!(prefix = %prefix, "Vault configured");

        let prefixed = VaultKeyPrefixDecorator::new(backend, prefix);
        Ok(Arc::new(VaultKeyValidationDecorator::new(Arc::new(prefixed))))
    }

    /// Build a vault from a YAML config file.
    ///
    /// A missing file yields the uncomposed [`NullVault`]: the system still
    /// gets a vault instance, and the failure surfaces on first use.
    pub fn from_config_file(path: impl AsRef<Path>, pool: &DbPool) -> Result<Arc<dyn Vault>> {
        match VaultSettings::load(path)? {
            Some(settings) => Self::from_settings(&settings, pool),
            None => {
                warn!("No vault configured. Define a vault config file to enable secret storage");
                Ok(Arc::new(NullVault))
            }
        }
    }
}
