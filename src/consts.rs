// src/consts.rs
//! Shared constants — fixed cryptographic parameters
//!
//! None of these are tunable. Envelopes produced by earlier releases (and by
//! other implementations of the same format) only decrypt if every value here
//! stays exactly as it is.

/// Symmetric cipher used by the vault and the hybrid channel
pub const ALGORITHM: &str = "aes-256-gcm";

/// AES-256 key length in bytes
pub const KEY_LENGTH: usize = 32;

/// GCM initialization vector length in bytes (not the 12-byte GCM default)
pub const IV_LENGTH: usize = 16;

/// Per-derivation PBKDF2 salt length in bytes
pub const SALT_LENGTH: usize = 64;

/// GCM authentication tag length in bytes
pub const TAG_LENGTH: usize = 16;

/// PBKDF2-HMAC-SHA512 rounds for password-derived keys
// ~50–100ms on modern hardware
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Modulus size for RSA identity keys
pub const RSA_MODULUS_BITS: usize = 4096;

/// Curve used for per-message key agreement
pub const ECDH_CURVE: &str = "secp256k1";

/// Default byte length for `generate_token`
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Default read buffer size for reader/writer streaming helpers
pub const DEFAULT_STREAM_CHUNK_SIZE: usize = 64 * 1024;
