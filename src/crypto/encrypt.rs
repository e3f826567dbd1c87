// src/crypto/encrypt.rs
use crate::consts::{ALGORITHM, SALT_LENGTH};
use crate::envelope::EncryptedData;
use crate::error::Result;
use crate::key_ops::{random_array, KeyMaterial};

use super::aead::seal;
use super::kdf::derive_key;

/// Encrypt raw bytes under a 32-byte key → hex envelope (no salt)
pub fn encrypt_bytes<'k>(plaintext: &[u8], key: impl Into<KeyMaterial<'k>>) -> Result<EncryptedData> {
    let key = key.into().resolve()?;
    let sealed = seal(&key, plaintext)?;

    tracing::debug!(algorithm = ALGORITHM, len = plaintext.len(), "vault encrypt");

    Ok(EncryptedData {
        encrypted: hex::encode(&sealed.ciphertext),
        iv: hex::encode(sealed.iv),
        tag: hex::encode(sealed.tag),
        salt: None,
    })
}

/// Encrypt a UTF-8 string under a 32-byte key (hex or raw)
///
/// Fails with `InvalidKeyLength` if the key is not exactly 32 bytes.
pub fn encrypt<'k>(plaintext: &str, key: impl Into<KeyMaterial<'k>>) -> Result<EncryptedData> {
    encrypt_bytes(plaintext.as_bytes(), key)
}

/// Encrypt with a human secret: fresh 64-byte salt → PBKDF2 → `encrypt`
///
/// The returned envelope carries the salt; it is needed to decrypt.
pub fn encrypt_with_password(plaintext: &str, password: &str) -> Result<EncryptedData> {
    let salt = random_array::<SALT_LENGTH>();
    let key = derive_key(password, &salt);

    let mut envelope = encrypt(plaintext, &key)?;
    envelope.salt = Some(hex::encode(salt));
    Ok(envelope)
}
