//! Envelope encryption with key rotation support.
//!
//! Secrets persisted by the local-store backend are encrypted with
//! AES-256-GCM. The ring holds one or more keys: the first is primary and
//! encrypts all new writes; decryption tries every key in order so that
//! values written under a retired key stay readable. Rotation is performed
//! by prepending a new key in configuration and keeping the old ones until
//! historical ciphertexts have been re-encrypted.
//!
//! Token layout is `nonce(12) || ciphertext || tag(16)`, a single opaque
//! blob matching the one `encrypted_value` column in the store.

use crate::errors::{Result, VaultError};
use base64::Engine;
use ring::aead::{self, Aad, BoundKey, Nonce, NonceSequence, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use tracing::debug;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_SIZE: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
const TAG_SIZE: usize = 16;

/// Size of an AES-256 key in bytes.
const KEY_SIZE: usize = 32;

/// Single-use nonce sequence for AES-GCM.
struct SingleNonce {
    nonce: Option<[u8; NONCE_SIZE]>,
}

impl SingleNonce {
    fn new(nonce_bytes: [u8; NONCE_SIZE]) -> Self {
        Self { nonce: Some(nonce_bytes) }
    }
}

impl NonceSequence for SingleNonce {
    fn advance(&mut self) -> std::result::Result<Nonce, ring::error::Unspecified> {
        self.nonce.take().map(Nonce::assume_unique_for_key).ok_or(ring::error::Unspecified)
    }
}

/// An ordered, non-empty ring of symmetric encryption keys.
#[derive(Clone)]
pub struct EncryptionKeyRing {
    keys: Vec<[u8; KEY_SIZE]>,
    rng: SystemRandom,
}

impl EncryptionKeyRing {
    /// Build a ring from base64-encoded 32-byte keys, most recent first.
    ///
    /// An empty list or a key of the wrong length is a configuration error.
    pub fn new(encoded_keys: &[String]) -> Result<Self> {
        if encoded_keys.is_empty() {
            return Err(VaultError::config(
                "encryption_keys must contain at least one key. Generate one with: openssl rand -base64 32",
            ));
        }

        let mut keys = Vec::with_capacity(encoded_keys.len());
        for (index, encoded) in encoded_keys.iter().enumerate() {
            let bytes =
                base64::engine::general_purpose::STANDARD.decode(encoded).map_err(|e| {
                    VaultError::config(format!(
                        "encryption_keys[{}] is not valid base64: {}",
                        index, e
                    ))
                })?;
            if bytes.len() != KEY_SIZE {
                return Err(VaultError::config(format!(
                    "encryption_keys[{}] must be {} bytes (256 bits), got {} bytes",
                    index,
                    KEY_SIZE,
                    bytes.len()
                )));
            }
            let mut key = [0u8; KEY_SIZE];
            key.copy_from_slice(&bytes);
            keys.push(key);
        }

        debug!(key_count = keys.len(), "Encryption key ring initialized");

        Ok(Self { keys, rng: SystemRandom::new() })
    }

    /// Number of keys in the ring.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Encrypt plaintext with the primary (first) key.
    ///
    /// Returns the opaque token `nonce || ciphertext || tag`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| VaultError::internal("Failed to generate random nonce for encryption"))?;

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.keys[0])
            .map_err(|_| VaultError::internal("Failed to create encryption key"))?;
        let mut sealing_key = aead::SealingKey::new(unbound_key, SingleNonce::new(nonce_bytes));

        let mut body = plaintext.to_vec();
        body.reserve(TAG_SIZE);
        sealing_key
            .seal_in_place_append_tag(Aad::empty(), &mut body)
            .map_err(|_| VaultError::internal("Failed to encrypt secret value"))?;

        let mut token = Vec::with_capacity(NONCE_SIZE + body.len());
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&body);

        Ok(token)
    }

    /// Decrypt a token by trying each key in ring order.
    ///
    /// An AEAD open failure means "wrong key" and moves on to the next; if
    /// no key opens the token the read fails with a decryption error, which
    /// is never mapped to an absent result.
    pub fn decrypt(&self, token: &[u8]) -> Result<Vec<u8>> {
        if token.len() < NONCE_SIZE + TAG_SIZE {
            return Err(VaultError::Decryption { key_count: self.keys.len() });
        }

        let (nonce, ciphertext) = token.split_at(NONCE_SIZE);
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);

        for key in &self.keys {
            let unbound_key = UnboundKey::new(&AES_256_GCM, key)
                .map_err(|_| VaultError::internal("Failed to create decryption key"))?;
            let mut opening_key =
                aead::OpeningKey::new(unbound_key, SingleNonce::new(nonce_bytes));

            let mut buffer = ciphertext.to_vec();
            if let Ok(plaintext) = opening_key.open_in_place(Aad::empty(), &mut buffer) {
                return Ok(plaintext.to_vec());
            }
        }

        Err(VaultError::Decryption { key_count: self.keys.len() })
    }
}

impl std::fmt::Debug for EncryptionKeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKeyRing")
            .field("key_count", &self.keys.len())
            .field("keys", &"[REDACTED]")
            .finish()
    }
}
