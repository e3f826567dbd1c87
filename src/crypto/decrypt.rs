// src/crypto/decrypt.rs
use crate::consts::ALGORITHM;
use crate::envelope::EncryptedData;
use crate::error::{CoreError, Result};
use crate::key_ops::KeyMaterial;

use super::aead::open;
use super::kdf::derive_key;

/// Decrypt an envelope to raw bytes
///
/// Wrong key, flipped bits and truncated fields all surface as
/// `AuthenticationFailed`; no plaintext is ever returned in that case.
pub fn decrypt_bytes<'k>(envelope: &EncryptedData, key: impl Into<KeyMaterial<'k>>) -> Result<Vec<u8>> {
    let key = key.into().resolve()?;
    let ciphertext = hex::decode(&envelope.encrypted)?;
    let iv = hex::decode(&envelope.iv)?;
    let tag = hex::decode(&envelope.tag)?;

    let plaintext = open(&key, &ciphertext, &iv, &tag).inspect_err(|_| {
        tracing::debug!(algorithm = ALGORITHM, "vault decrypt rejected");
    })?;

    Ok(plaintext)
}

/// Decrypt an envelope produced by `encrypt` back to the original string
pub fn decrypt<'k>(envelope: &EncryptedData, key: impl Into<KeyMaterial<'k>>) -> Result<String> {
    Ok(String::from_utf8(decrypt_bytes(envelope, key)?)?)
}

/// Re-derive the key from `password` + the envelope's salt, then `decrypt`
pub fn decrypt_with_password(envelope: &EncryptedData, password: &str) -> Result<String> {
    let salt = envelope.salt.as_deref().ok_or(CoreError::MissingSalt)?;
    let salt = hex::decode(salt)?;
    let key = derive_key(password, &salt);

    decrypt(envelope, &key)
}
