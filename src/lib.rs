//! # Strongroom
//!
//! Strongroom is a secret-storage abstraction layer: a uniform read/write
//! contract for secrets backed by interchangeable storage providers, wrapped
//! by composable decorators for key-path hygiene, namespace isolation and
//! instance-wide prefixing.
//!
//! ## Architecture
//!
//! ```text
//! caller → validation decorator → prefix decorator → (user namespace) → backend
//!                                                                          ↓
//!                                              local database / Vault KV / federated IdP
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use strongroom::storage::{create_pool, DatabaseConfig};
//! use strongroom::vault::{Vault, VaultFactory};
//!
//! #[tokio::main]
//! async fn main() -> strongroom::Result<()> {
//!     strongroom::observability::init_tracing();
//!
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     let vault = VaultFactory::from_config_file("vault_conf.yml", &pool)?;
//!
//!     vault.write_secret("service/api_key", "s3cret").await?;
//!     let value = vault.read_secret("service/api_key").await?;
//!     assert!(value.is_some());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod storage;
pub mod vault;

// Re-export commonly used types and traits
pub use config::{BackendSettings, VaultSettings};
pub use errors::{Result, VaultError};
pub use vault::{
    DatabaseVault, EncryptionKeyRing, FederatedVault, HashicorpVault, KeyPath, NullVault,
    SecretString, UserVaultWrapper, Vault, VaultFactory, VaultKeyPrefixDecorator,
    VaultKeyValidationDecorator,
};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml.
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
