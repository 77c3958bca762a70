//! Secret-storage abstraction layer.
//!
//! This module provides a uniform read/write contract for secrets backed by
//! interchangeable storage providers, composed with decorators for key-path
//! hygiene, instance-wide prefixing and per-user namespacing.
//!
//! # Architecture
//!
//! Everything implements the [`Vault`] trait:
//! - **read_secret**: return the value stored at a key, or absent
//! - **write_secret**: store or overwrite the value at a key
//!
//! Concrete backends:
//! - [`DatabaseVault`]: encrypted hierarchical storage in the local database
//! - [`HashicorpVault`]: pass-through to a HashiCorp Vault KV v2 engine
//! - [`FederatedVault`]: pass-through to an identity-federation secret service
//! - [`NullVault`]: safe default that fails on first use when nothing is
//!   configured
//!
//! Decorators wrap another vault instance and share the same contract:
//! [`VaultKeyValidationDecorator`], [`VaultKeyPrefixDecorator`] and
//! [`UserVaultWrapper`]. [`VaultFactory`] reads the backend configuration
//! and produces the standard chain
//! `validation(prefix(backend))` used by the rest of the system.
//!
//! "Not found" is never an error: every backend normalizes its own
//! not-found signal to `Ok(None)`.

pub mod database;
pub mod factory;
pub mod federated;
pub mod hashicorp;
pub mod key_path;
pub mod keyring;
pub mod null;
pub mod prefix;
pub mod types;
pub mod user;
pub mod validation;

use crate::errors::Result;
use async_trait::async_trait;

pub use database::DatabaseVault;
pub use factory::VaultFactory;
pub use federated::{FederatedVault, FederatedVaultConfig};
pub use hashicorp::{HashicorpVault, HashicorpVaultConfig};
pub use key_path::KeyPath;
pub use keyring::EncryptionKeyRing;
pub use null::NullVault;
pub use prefix::VaultKeyPrefixDecorator;
pub use types::SecretString;
pub use user::UserVaultWrapper;
pub use validation::VaultKeyValidationDecorator;

/// The vault capability contract.
///
/// Implemented identically in signature by every backend and decorator so
/// that instances compose into a chain behind `Arc<dyn Vault>`.
#[async_trait]
pub trait Vault: Send + Sync + std::fmt::Debug {
    /// Return the value stored at `key`, or `Ok(None)` if no value exists
    /// at that exact key. Absence is a normal, non-error result.
    async fn read_secret(&self, key: &str) -> Result<Option<SecretString>>;

    /// Store or overwrite the value at `key`. Hierarchical backends may
    /// create the key's missing ancestor entries as a side effect.
    async fn write_secret(&self, key: &str, value: &str) -> Result<()>;
}
