// src/envelope.rs
//! Envelope types — everything a caller must persist to decrypt later
//!
//! Field names on the wire match the format already stored by consumers
//! (`ephemeralPublicKey`, not `ephemeral_public_key`). Losing any field makes
//! the ciphertext permanently undecryptable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Output of the symmetric vault (`encrypt` / `encrypt_with_password`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// Ciphertext, hex
    pub encrypted: String,
    /// 16-byte IV, hex
    pub iv: String,
    /// 16-byte GCM tag, hex
    pub tag: String,
    /// 64-byte PBKDF2 salt, hex — present only for password envelopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl EncryptedData {
    /// `true` when the envelope needs a password rather than a raw key
    pub fn is_password_protected(&self) -> bool {
        self.salt.is_some()
    }
}

/// Output of the hybrid channel (`encrypt_message`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedMessage {
    pub ciphertext: String,
    /// Single-use sender key, uncompressed SEC1 hex
    pub ephemeral_public_key: String,
    pub iv: String,
    pub tag: String,
}

/// A public/private pair. RSA pairs are PEM (SPKI / PKCS#8), ECDH pairs are hex.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
