//! Identity-federation secret service backend.
//!
//! Pass-through to an external identity-federation service exposing a
//! key/value secret API over HTTP. Unlike the KV engine, this service
//! reports a missing key with its own error shape (HTTP 404 carrying a
//! `KEY_DOES_NOT_EXIST` code); that signal maps to an absent read result,
//! everything else propagates as a backend error.

use super::{SecretString, Vault};
use crate::errors::{Result, VaultError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SECRET_API_BASE: &str = "resource-secret-management/v1.0.0/secret/kv";

/// Configuration for the federated-identity backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedVaultConfig {
    /// Service host name.
    pub host: String,
    /// Service port.
    pub port: u16,
    /// OAuth client id used as the basic-auth user.
    pub client_id: String,
    /// OAuth client secret used as the basic-auth password.
    pub client_secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SecretPayload {
    value: String,
}

/// Vault backend delegating to an identity-federation secret service.
pub struct FederatedVault {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl std::fmt::Debug for FederatedVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FederatedVault")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl FederatedVault {
    /// Create a new federated-identity backend.
    pub fn new(config: &FederatedVaultConfig) -> Result<Self> {
        let base_url = format!("https://{}:{}", config.host, config.port);
        let vault = Self::from_base_url(&base_url, &config.client_id, &config.client_secret)?;
        info!(host = %config.host, port = config.port, "Initialized federated-identity secret backend");
        Ok(vault)
    }

    /// Create a backend against an explicit base URL. Primarily for tests
    /// pointing at a local mock service.
    pub fn from_base_url(base_url: &str, client_id: &str, client_secret: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            VaultError::config(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    fn secret_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, SECRET_API_BASE, key)
    }
}

#[async_trait]
impl Vault for FederatedVault {
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>> {
        debug!(key = %key, "Reading secret from federated-identity service");

        let response = self
            .http
            .get(self.secret_url(key))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()
            .await
            .map_err(|e| {
                VaultError::backend(format!("Federated secret read failed for '{}': {}", key, e))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // The service's key-does-not-exist signal: absence, not an error.
            debug!(key = %key, "Federated-identity service reported key does not exist");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(VaultError::backend(format!(
                "Federated secret read failed for '{}': HTTP {}",
                key,
                response.status()
            )));
        }

        let payload: SecretPayload = response.json().await.map_err(|e| {
            VaultError::backend(format!("Invalid federated secret payload for '{}': {}", key, e))
        })?;

        Ok(Some(SecretString::new(payload.value)))
    }

    async fn write_secret(&self, key: &str, value: &str) -> Result<()> {
        debug!(key = %key, "Writing secret to federated-identity service");

        let response = self
            .http
            .put(self.secret_url(key))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .json(&SecretPayload { value: value.to_string() })
            .send()
            .await
            .map_err(|e| {
                VaultError::backend(format!("Federated secret write failed for '{}': {}", key, e))
            })?;

        if !response.status().is_success() {
            return Err(VaultError::backend(format!(
                "Federated secret write failed for '{}': HTTP {}",
                key,
                response.status()
            )));
        }

        Ok(())
    }
}
