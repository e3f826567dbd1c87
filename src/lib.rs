// src/lib.rs
//! e2ee-vault — hybrid end-to-end message encryption and an at-rest vault
//!
//! Features:
//! - AES-256-GCM envelopes (16-byte IV, detached tag), raw-key or PBKDF2-SHA512
//! - Incremental GCM streams for large documents
//! - One-shot secp256k1 ECDH message encryption
//! - RSA-4096 signatures and OAEP key wrapping
//! - Zeroize-on-drop key material via secure-gate
//!
//! Everything is a pure function over in-memory buffers: no I/O (beyond the
//! optional reader/writer stream helpers), no shared state, safe to call
//! from any thread.

pub mod aliases;
pub mod channel;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod key_ops;

#[cfg(feature = "logging")]
pub mod logging;

// Re-export everything users need at the crate root
pub use aliases::{SharedSecret32, SymmetricKey32};
pub use channel::{
    decrypt_message, derive_shared_secret, encrypt_message, generate_ecdh_key_pair,
    generate_key_pair, rsa_decrypt, rsa_encrypt, sign, verify,
};
pub use crypto::{
    create_decrypt_stream, create_encrypt_stream, decrypt, decrypt_bytes, decrypt_reader,
    decrypt_with_password, derive_key, encrypt, encrypt_bytes, encrypt_reader,
    encrypt_with_password, DecryptStream, EncryptStream, StreamHeader,
};
pub use envelope::{EncryptedData, EncryptedMessage, KeyPair};
pub use error::{CoreError, Result};
pub use key_ops::{generate_key, generate_token, hash, random_key, KeyMaterial};

#[cfg(feature = "logging")]
pub use logging::init_logging;
