//! HashiCorp Vault KV v2 backend.
//!
//! Stateless pass-through keyed by the fully-qualified path string. Values
//! live under the `value` field of the KV v2 data map.

use super::{SecretString, Vault};
use crate::errors::{Result, VaultError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::error::ClientError;
use vaultrs::kv2;

fn default_mount() -> String {
    "secret".to_string()
}

/// Configuration for the HashiCorp Vault backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashicorpVaultConfig {
    /// Vault server address.
    pub address: String,
    /// Vault authentication token.
    pub token: String,
    /// KV v2 mount path (default: "secret").
    #[serde(default = "default_mount")]
    pub mount: String,
}

/// Vault backend delegating to a HashiCorp Vault KV v2 engine.
pub struct HashicorpVault {
    client: VaultClient,
    mount: String,
}

impl std::fmt::Debug for HashicorpVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashicorpVault")
            .field("mount", &self.mount)
            .field("client", &"[VaultClient]")
            .finish()
    }
}

impl HashicorpVault {
    /// Create a new HashiCorp Vault backend.
    pub fn new(config: &HashicorpVaultConfig) -> Result<Self> {
        let settings = VaultClientSettingsBuilder::default()
            .address(&config.address)
            .token(&config.token)
            .build()
            .map_err(|e| {
                VaultError::config(format!("Invalid HashiCorp Vault configuration: {}", e))
            })?;

        let client = VaultClient::new(settings).map_err(|e| {
            VaultError::config(format!("Failed to create HashiCorp Vault client: {}", e))
        })?;

        info!(address = %config.address, mount = %config.mount, "Initialized HashiCorp Vault backend");

        Ok(Self { client, mount: config.mount.clone() })
    }
}

#[async_trait]
impl Vault for HashicorpVault {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        debug!(key = %key, mount = %self.mount, "Reading secret from HashiCorp Vault");

        match kv2::read::<HashMap<String, String>>(&self.client, &self.mount, key).await {
            Ok(mut data) => Ok(data.remove("value").map(SecretString::new)),
            // The KV engine signals an unknown path with a 404 API error;
            // that is absence, not a failure. Everything else propagates.
            Err(ClientError::APIError { code: 404, .. }) => Ok(None),
            Err(e) => {
                Err(VaultError::backend(format!("Vault read failed for '{}': {}", key, e)))
            }
        }
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        debug!(key = %key, mount = %self.mount, "Writing secret to HashiCorp Vault");

        let data = HashMap::from([("value", value)]);
        kv2::set(&self.client, &self.mount, key, &data)
            .await
            .map_err(|e| VaultError::backend(format!("Vault write failed for '{}': {}", key, e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_defaults_to_secret() {
        let config: HashicorpVaultConfig = serde_yaml::from_str(
            "address: http://localhost:8200\ntoken: dev-token\n",
        )
        .unwrap();
        assert_eq!(config.mount, "secret");
    }

    #[test]
    fn test_debug_hides_client() {
        let config = HashicorpVaultConfig {
            address: "http://localhost:8200".to_string(),
            token: "dev-token".to_string(),
            mount: default_mount(),
        };
        let vault = HashicorpVault::new(&config).unwrap();
        let debug = format!("{:?}", vault);
        assert!(debug.contains("[VaultClient]"));
        assert!(!debug.contains("dev-token"));
    }
}
