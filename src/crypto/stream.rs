// src/crypto/stream.rs
//! Incremental AES-256-GCM for payloads too large to hold in memory
//!
//! This is the low-level escape hatch, kept separate from `encrypt`/`decrypt`:
//! the caller feeds chunks, and the IV plus the final tag must be stored next
//! to the ciphertext by hand. Output is byte-for-byte what the whole-buffer
//! path produces for the same key and IV, so either side can open the other.
//!
//! A single stream carries at most 2^36 - 32 bytes (the GCM limit); `update`
//! returns `PayloadTooLarge` past that point instead of reusing keystream.
//!
//! `DecryptStream::update` releases plaintext before the tag is checked.
//! Anything written before `finalize` returns `Ok` must be treated as
//! untrusted and discarded on failure.

use std::io::{Read, Write};

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit, KeyIvInit, StreamCipher};
use aes::Aes256;
use ctr::Ctr32BE;
use ghash::universal_hash::UniversalHash;
use ghash::GHash;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::aliases::SymmetricKey32;
use crate::consts::{ALGORITHM, IV_LENGTH, TAG_LENGTH};
use crate::error::{CoreError, Result};
use crate::key_ops::{random_array, KeyMaterial};

use super::aead::{too_large, GCM_MAX_PLAINTEXT};

const BLOCK: usize = 16;

/// IV and tag of a streamed ciphertext, both hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamHeader {
    pub iv: String,
    pub tag: String,
}

/// CTR keystream + running GHASH over the ciphertext
struct GcmCore {
    ctr: Ctr32BE<Aes256>,
    ghash: GHash,
    tag_mask: [u8; TAG_LENGTH],
    partial: Vec<u8>,
    ciphertext_len: u64,
}

impl GcmCore {
    fn new(key: &SymmetricKey32, iv: &[u8; IV_LENGTH]) -> Self {
        let key = GenericArray::from_slice(key.expose_secret());
        let block_cipher = Aes256::new(key);

        let mut hash_key = ghash::Key::default();
        block_cipher.encrypt_block(&mut hash_key);
        let ghash = GHash::new(&hash_key);

        // J0 for a non-96-bit IV: GHASH(IV || 0-pad || [0]64 || [len(IV) in bits]64)
        let mut j0_hash = ghash.clone();
        j0_hash.update_padded(iv);
        let mut len_block = ghash::Block::default();
        len_block[8..].copy_from_slice(&((IV_LENGTH as u64) * 8).to_be_bytes());
        j0_hash.update(&[len_block]);
        let j0 = j0_hash.finalize();

        let mut ctr = Ctr32BE::<Aes256>::new(key, &j0);
        let mut tag_mask = [0u8; TAG_LENGTH];
        ctr.apply_keystream(&mut tag_mask);

        Self {
            ctr,
            ghash,
            tag_mask,
            partial: Vec::with_capacity(BLOCK),
            ciphertext_len: 0,
        }
    }

    /// Keystream for the next `buf.len()` bytes; refuses to cross the GCM limit
    fn apply_keystream(&mut self, buf: &mut [u8]) -> Result<()> {
        let processed = self.ciphertext_len + buf.len() as u64;
        if processed > GCM_MAX_PLAINTEXT {
            return Err(too_large(processed));
        }
        self.ctr
            .try_apply_keystream(buf)
            .map_err(|_| too_large(processed))
    }

    fn absorb(&mut self, ciphertext: &[u8]) {
        self.ciphertext_len += ciphertext.len() as u64;
        self.partial.extend_from_slice(ciphertext);

        let full = self.partial.len() - self.partial.len() % BLOCK;
        for chunk in self.partial[..full].chunks_exact(BLOCK) {
            self.ghash.update(&[*ghash::Block::from_slice(chunk)]);
        }
        self.partial.drain(..full);
    }

    fn tag(mut self) -> [u8; TAG_LENGTH] {
        self.ghash.update_padded(&self.partial);

        // no associated data, so the AAD bit length stays zero
        let mut len_block = ghash::Block::default();
        len_block[8..].copy_from_slice(&(self.ciphertext_len * 8).to_be_bytes());
        self.ghash.update(&[len_block]);

        let mut tag = [0u8; TAG_LENGTH];
        for ((out, s), m) in tag.iter_mut().zip(self.ghash.finalize()).zip(self.tag_mask) {
            *out = s ^ m;
        }
        tag
    }
}

/// Encrypting half of the stream pair. Obtain with [`create_encrypt_stream`].
pub struct EncryptStream {
    core: GcmCore,
    iv: String,
}

impl EncryptStream {
    /// IV for this stream, hex. Persist it alongside the ciphertext.
    pub fn iv(&self) -> &str {
        &self.iv
    }

    /// Encrypt the next chunk
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = chunk.to_vec();
        self.core.apply_keystream(&mut out)?;
        self.core.absorb(&out);
        Ok(out)
    }

    /// Finish the stream and return the authentication tag, hex
    pub fn finalize(self) -> String {
        hex::encode(self.core.tag())
    }
}

/// Decrypting half of the stream pair. Obtain with [`create_decrypt_stream`].
pub struct DecryptStream {
    core: GcmCore,
}

impl DecryptStream {
    /// Decrypt the next chunk. The result is unauthenticated until `finalize`.
    pub fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let mut out = chunk.to_vec();
        self.core.apply_keystream(&mut out)?;
        self.core.absorb(chunk);
        Ok(out)
    }

    /// Check the expected tag against everything fed through `update`
    pub fn finalize(self, tag: &str) -> Result<()> {
        let expected = hex::decode(tag)?;
        let actual = self.core.tag();

        if expected.len() != TAG_LENGTH || !bool::from(actual.as_slice().ct_eq(&expected)) {
            return Err(CoreError::AuthenticationFailed);
        }
        Ok(())
    }
}

/// Start an incremental encryption under a fresh random IV
pub fn create_encrypt_stream<'k>(key: impl Into<KeyMaterial<'k>>) -> Result<EncryptStream> {
    let key = key.into().resolve()?;
    let iv = random_array::<IV_LENGTH>();

    Ok(EncryptStream {
        core: GcmCore::new(&key, &iv),
        iv: hex::encode(iv),
    })
}

/// Start an incremental decryption for a stream sealed under `iv` (hex)
pub fn create_decrypt_stream<'k>(key: impl Into<KeyMaterial<'k>>, iv: &str) -> Result<DecryptStream> {
    let key = key.into().resolve()?;
    let mut iv_bytes = [0u8; IV_LENGTH];
    hex::decode_to_slice(iv, &mut iv_bytes).map_err(|_| CoreError::AuthenticationFailed)?;

    Ok(DecryptStream {
        core: GcmCore::new(&key, &iv_bytes),
    })
}

fn read_buffer(chunk_size: usize) -> Result<Vec<u8>> {
    if chunk_size == 0 {
        return Err(CoreError::InvalidConfig(
            "chunk_size must be greater than zero".into(),
        ));
    }
    Ok(vec![0u8; chunk_size])
}

/// Encrypt everything `reader` yields into `writer`, returning the IV and tag.
///
/// `chunk_size` is the read buffer size in bytes (see
/// `consts::DEFAULT_STREAM_CHUNK_SIZE`).
pub fn encrypt_reader<'k, R: Read, W: Write>(
    key: impl Into<KeyMaterial<'k>>,
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
) -> Result<StreamHeader> {
    let mut buf = read_buffer(chunk_size)?;
    let mut stream = create_encrypt_stream(key)?;
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&stream.update(&buf[..n])?)?;
        total += n as u64;
    }
    writer.flush()?;

    tracing::debug!(algorithm = ALGORITHM, bytes = total, "stream encrypt finished");

    let iv = stream.iv().to_owned();
    Ok(StreamHeader {
        iv,
        tag: stream.finalize(),
    })
}

/// Decrypt `reader` into `writer` and verify the tag at the end.
///
/// Returns the number of plaintext bytes written. On `AuthenticationFailed`
/// the bytes already written are garbage and must be discarded.
pub fn decrypt_reader<'k, R: Read, W: Write>(
    key: impl Into<KeyMaterial<'k>>,
    header: &StreamHeader,
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
) -> Result<u64> {
    let mut buf = read_buffer(chunk_size)?;
    let mut stream = create_decrypt_stream(key, &header.iv)?;
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&stream.update(&buf[..n])?)?;
        total += n as u64;
    }
    writer.flush()?;

    stream.finalize(&header.tag).inspect_err(|_| {
        tracing::warn!(bytes = total, "stream tag mismatch; discard written plaintext");
    })?;
    Ok(total)
}
