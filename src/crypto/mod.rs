// src/crypto/mod.rs
//! Symmetric vault — authenticated at-rest encryption
//!
//! Pure functions over in-memory buffers; the stream module adds an
//! incremental variant for large payloads.

pub(crate) mod aead;
pub mod decrypt;
pub mod encrypt;
pub mod kdf;
pub mod stream;

pub use decrypt::{decrypt, decrypt_bytes, decrypt_with_password};
pub use encrypt::{encrypt, encrypt_bytes, encrypt_with_password};
pub use kdf::derive_key;
pub use stream::{
    create_decrypt_stream, create_encrypt_stream, decrypt_reader, encrypt_reader, DecryptStream,
    EncryptStream, StreamHeader,
};
