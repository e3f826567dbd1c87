// src/channel/mod.rs
//! Hybrid channel — message confidentiality between two parties
//!
//! ECDH (secp256k1) per message, plus RSA identity helpers for signatures and
//! small-payload wrapping.

pub mod ecdh;
pub mod identity;
pub mod message;

pub use ecdh::{derive_shared_secret, generate_ecdh_key_pair};
pub use identity::{generate_key_pair, max_oaep_payload, rsa_decrypt, rsa_encrypt, sign, verify};
pub use message::{decrypt_message, encrypt_message};
