//! Vault configuration.
//!
//! Configuration is a small YAML record with a required `type` discriminator
//! selecting the backend, type-specific fields, and an optional shared
//! `path_prefix`. It flows once, at startup, from the factory into the
//! composed chain; no component re-reads it afterward.

use crate::errors::{Result, VaultError};
use crate::vault::{FederatedVaultConfig, HashicorpVaultConfig};
use serde::Deserialize;
use std::path::Path;

/// Backend selection plus its type-specific configuration.
///
/// Unknown `type` values or missing required fields fail deserialization,
/// surfaced as a fatal configuration error at construction time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BackendSettings {
    /// Encrypted hierarchical storage in the local database.
    LocalStore {
        /// Ordered base64-encoded symmetric keys, primary first.
        encryption_keys: Vec<String>,
    },
    /// HashiCorp Vault KV v2.
    RemoteKv(HashicorpVaultConfig),
    /// Identity-federation secret service.
    FederatedIdentity(FederatedVaultConfig),
}

/// Complete vault configuration record.
#[derive(Debug, Clone, Deserialize)]
pub struct VaultSettings {
    /// Instance-wide key prefix. Defaults to the fixed instance root when
    /// absent.
    #[serde(default)]
    pub path_prefix: Option<String>,

    #[serde(flatten)]
    pub backend: BackendSettings,
}

impl VaultSettings {
    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| VaultError::config(format!("Invalid vault configuration: {}", e)))
    }

    /// Load settings from a YAML file.
    ///
    /// Returns `Ok(None)` when the file does not exist, which the factory
    /// treats as "no vault configured". A file that exists but fails to
    /// parse is a configuration error.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            VaultError::config(format!(
                "Failed to read vault config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(Self::from_yaml(&contents)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_store_settings() {
        let settings = VaultSettings::from_yaml(
            "type: local-store\nencryption_keys:\n  - abc123\n  - def456\n",
        )
        .unwrap();
        assert!(settings.path_prefix.is_none());
        match settings.backend {
            BackendSettings::LocalStore { encryption_keys } => {
                assert_eq!(encryption_keys, vec!["abc123", "def456"]);
            }
            other => panic!("unexpected backend: {:?}", other),
        }
    }

    #[test]
    fn test_remote_kv_settings_with_prefix() {
        let settings = VaultSettings::from_yaml(
            "type: remote-kv\npath_prefix: /myinstance\naddress: http://localhost:8200\ntoken: dev\n",
        )
        .unwrap();
        assert_eq!(settings.path_prefix.as_deref(), Some("/myinstance"));
        assert!(matches!(settings.backend, BackendSettings::RemoteKv(_)));
    }

    #[test]
    fn test_federated_identity_settings() {
        let settings = VaultSettings::from_yaml(
            "type: federated-identity\nhost: idp.example\nport: 9443\nclient_id: cid\nclient_secret: csec\n",
        )
        .unwrap();
        match settings.backend {
            BackendSettings::FederatedIdentity(config) => {
                assert_eq!(config.host, "idp.example");
                assert_eq!(config.port, 9443);
            }
            other => panic!("unexpected backend: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_config_error() {
        let err = VaultSettings::from_yaml("type: etcd\n").unwrap_err();
        assert!(matches!(err, VaultError::Config { .. }));
    }

    #[test]
    fn test_missing_required_field_is_config_error() {
        // remote-kv without a token
        let err =
            VaultSettings::from_yaml("type: remote-kv\naddress: http://localhost:8200\n")
                .unwrap_err();
        assert!(matches!(err, VaultError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let loaded = VaultSettings::load("/nonexistent/vault.yml").unwrap();
        assert!(loaded.is_none());
    }
}
