// src/key_ops.rs
//! Key generation, key input forms, hashing and token helpers
//!
//! All randomness comes from the operating system CSPRNG (`OsRng`).

use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};

use crate::aliases::SymmetricKey32;
use crate::consts::KEY_LENGTH;
use crate::error::{CoreError, Result};

/// A symmetric key as callers hand it over: hex text or raw bytes.
///
/// Both forms must resolve to exactly [`KEY_LENGTH`] bytes.
#[derive(Clone, Copy)]
pub enum KeyMaterial<'a> {
    Hex(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for KeyMaterial<'a> {
    fn from(hex: &'a str) -> Self {
        KeyMaterial::Hex(hex)
    }
}

impl<'a> From<&'a String> for KeyMaterial<'a> {
    fn from(hex: &'a String) -> Self {
        KeyMaterial::Hex(hex.as_str())
    }
}

impl<'a> From<&'a [u8]> for KeyMaterial<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        KeyMaterial::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for KeyMaterial<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        KeyMaterial::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for KeyMaterial<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        KeyMaterial::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a SymmetricKey32> for KeyMaterial<'a> {
    fn from(key: &'a SymmetricKey32) -> Self {
        KeyMaterial::Bytes(key.expose_secret().as_slice())
    }
}

impl KeyMaterial<'_> {
    /// Length check happens here, before any cipher is constructed.
    pub(crate) fn resolve(self) -> Result<SymmetricKey32> {
        let mut raw = [0u8; KEY_LENGTH];
        match self {
            KeyMaterial::Hex(text) => {
                if text.len() != KEY_LENGTH * 2 {
                    return Err(CoreError::InvalidKeyLength {
                        expected: KEY_LENGTH,
                        actual: text.len() / 2,
                    });
                }
                hex::decode_to_slice(text, &mut raw)?;
            }
            KeyMaterial::Bytes(bytes) => {
                if bytes.len() != KEY_LENGTH {
                    return Err(CoreError::InvalidKeyLength {
                        expected: KEY_LENGTH,
                        actual: bytes.len(),
                    });
                }
                raw.copy_from_slice(bytes);
            }
        }
        Ok(SymmetricKey32::new(raw))
    }
}

/// Fill a fixed-size array from the OS CSPRNG
pub(crate) fn random_array<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    OsRng.fill_bytes(&mut out);
    out
}

/// Generate a new random 256-bit key, wrapped so it zeroizes on drop
#[inline]
pub fn random_key() -> SymmetricKey32 {
    SymmetricKey32::new(random_array::<KEY_LENGTH>())
}

/// Generate a new random 256-bit key as lowercase hex
pub fn generate_key() -> String {
    hex::encode(random_key().expose_secret())
}

/// SHA-256 digest as lowercase hex. Fingerprinting only, not password storage.
pub fn hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

/// `length` random bytes as hex (so the string is `2 * length` chars)
pub fn generate_token(length: usize) -> String {
    let mut buf = vec![0u8; length];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_key_of_wrong_length_is_rejected_before_decoding() {
        let err = KeyMaterial::Hex("abcd").resolve().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidKeyLength {
                expected: 32,
                actual: 2
            }
        ));
    }

    #[test]
    fn non_hex_key_is_an_encoding_error() {
        let text = "zz".repeat(KEY_LENGTH);
        let err = KeyMaterial::Hex(&text).resolve().unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn hex_and_bytes_resolve_to_the_same_key() {
        let raw = [0x42u8; KEY_LENGTH];
        let text = hex::encode(raw);
        let a = KeyMaterial::from(&raw).resolve().unwrap();
        let b = KeyMaterial::from(text.as_str()).resolve().unwrap();
        assert_eq!(a.expose_secret(), b.expose_secret());
    }
}
