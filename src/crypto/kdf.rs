// src/crypto/kdf.rs
//! Password → key derivation (PBKDF2-HMAC-SHA512)

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use crate::aliases::SymmetricKey32;
use crate::consts::{KEY_LENGTH, PBKDF2_ITERATIONS};

/// Derive a 32-byte key from `password` and `salt`.
///
/// Deterministic: the salt stored next to the ciphertext must reproduce the
/// same key at decrypt time. Deliberately slow — keep it off latency-sensitive
/// paths.
pub fn derive_key(password: &str, salt: &[u8]) -> SymmetricKey32 {
    tracing::trace!(salt_len = salt.len(), "deriving key with PBKDF2-SHA512");

    let mut out = [0u8; KEY_LENGTH];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut out);
    SymmetricKey32::new(out)
}
