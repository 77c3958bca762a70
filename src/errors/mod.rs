//! Error types for vault operations using `thiserror`.
//!
//! "Not found" is deliberately not represented here: every backend maps its
//! own not-found signal to an absent read result, so the taxonomy only
//! covers configuration, validation, I/O and decryption failures.

use thiserror::Error;

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur during vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Invalid configuration: unknown backend type, missing required fields,
    /// or bad key material. Fatal at construction time.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Malformed key path supplied by a caller.
    #[error("Invalid vault key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Operation attempted against the null backend; the deployment has no
    /// secret storage configured.
    #[error("No vault configured. Define a vault config file to enable secret storage")]
    NotConfigured,

    /// Database failure in the local-store backend.
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// Network or service failure in a remote backend.
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// None of the configured encryption keys could decrypt a stored value.
    /// Indicates key-ring misconfiguration or data corruption; never mapped
    /// to an absent result.
    #[error("Decryption failed: none of the {key_count} configured encryption keys opened the stored value")]
    Decryption { key_count: usize },

    /// Generic internal error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl VaultError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into(), reason: reason.into() }
    }

    /// Create a database error with context.
    pub fn database(source: sqlx::Error, context: impl Into<String>) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend { message: message.into() }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = VaultError::config("missing encryption_keys");
        assert!(matches!(err, VaultError::Config { .. }));
        assert!(err.to_string().contains("missing encryption_keys"));

        let err = VaultError::invalid_key("a//b", "doubled separator");
        assert!(matches!(err, VaultError::InvalidKey { .. }));
        assert!(err.to_string().contains("a//b"));

        let err = VaultError::backend("connection refused");
        assert!(matches!(err, VaultError::Backend { .. }));
    }

    #[test]
    fn test_not_configured_display() {
        let err = VaultError::NotConfigured;
        assert!(err.to_string().contains("No vault configured"));
    }

    #[test]
    fn test_decryption_display_names_key_count() {
        let err = VaultError::Decryption { key_count: 3 };
        assert!(err.to_string().contains('3'));
    }
}
