// src/error.rs
//! Public error type for the entire crate
//!
//! Variants are deliberately coarse. Decrypt paths collapse every
//! wrong-key / corrupted-ciphertext case into `AuthenticationFailed` so a
//! caller (or an attacker watching one) cannot tell them apart.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid key length. Expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Salt is required for password-based decryption")]
    MissingSalt,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Payload too large: {actual} bytes exceeds the {max}-byte limit")]
    PayloadTooLarge { max: usize, actual: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl From<hex::FromHexError> for CoreError {
    fn from(err: hex::FromHexError) -> Self {
        CoreError::Encoding(format!("invalid hex: {err}"))
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(err: base64::DecodeError) -> Self {
        CoreError::Encoding(format!("invalid base64: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for CoreError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        CoreError::Encoding("plaintext is not valid UTF-8".into())
    }
}
