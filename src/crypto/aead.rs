// src/crypto/aead.rs
//! AES-256-GCM with a 16-byte IV — the one AEAD routine in the crate
//!
//! Shared leaf for the symmetric vault and the hybrid channel. Works on raw
//! byte buffers; hex encoding is the callers' business.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Key, Nonce, Tag};

use crate::aliases::SymmetricKey32;
use crate::consts::{IV_LENGTH, TAG_LENGTH};
use crate::error::{CoreError, Result};
use crate::key_ops::random_array;

/// GCM plaintext limit: 2^32 - 2 blocks, i.e. 2^36 - 32 bytes
pub(crate) const GCM_MAX_PLAINTEXT: u64 = (1 << 36) - 32;

pub(crate) fn too_large(actual: u64) -> CoreError {
    CoreError::PayloadTooLarge {
        max: usize::try_from(GCM_MAX_PLAINTEXT).unwrap_or(usize::MAX),
        actual: usize::try_from(actual).unwrap_or(usize::MAX),
    }
}

/// AES-256-GCM parameterized for 16-byte nonces
pub(crate) type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Ciphertext plus the detached IV and tag it was sealed under
pub(crate) struct Sealed {
    pub ciphertext: Vec<u8>,
    pub iv: [u8; IV_LENGTH],
    pub tag: [u8; TAG_LENGTH],
}

fn cipher(key: &SymmetricKey32) -> Aes256Gcm16 {
    Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.expose_secret()))
}

/// Encrypt under a fresh random IV
pub(crate) fn seal(key: &SymmetricKey32, plaintext: &[u8]) -> Result<Sealed> {
    let iv = random_array::<IV_LENGTH>();
    let mut buffer = plaintext.to_vec();

    let tag = cipher(key)
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
        .map_err(|_| too_large(plaintext.len() as u64))?;

    let mut tag_bytes = [0u8; TAG_LENGTH];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        ciphertext: buffer,
        iv,
        tag: tag_bytes,
    })
}

/// Verify the tag and decrypt. Nothing is returned unless the tag matches.
pub(crate) fn open(key: &SymmetricKey32, ciphertext: &[u8], iv: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
    if iv.len() != IV_LENGTH || tag.len() != TAG_LENGTH {
        return Err(CoreError::AuthenticationFailed);
    }

    let mut buffer = ciphertext.to_vec();
    cipher(key)
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(iv),
            b"",
            &mut buffer,
            Tag::<U16>::from_slice(tag),
        )
        .map_err(|_| CoreError::AuthenticationFailed)?;

    Ok(buffer)
}
