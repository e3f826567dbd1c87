// tests/common.rs
//! Shared test utilities — logging setup and a cached RSA pair

use std::sync::OnceLock;

use e2ee_vault::{generate_key_pair, KeyPair};

#[cfg(feature = "logging")]
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
#[allow(dead_code)]
pub fn setup() {
    #[cfg(feature = "logging")]
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent — safe to call multiple times

    #[cfg(not(feature = "logging"))]
    { /* no-op */ }
}

/// RSA-4096 generation is slow — one pair per test binary
#[allow(dead_code)]
pub fn rsa_pair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_key_pair().expect("generate RSA pair"))
}

/// A second, unrelated pair for mismatched-key checks
#[allow(dead_code)]
pub fn other_rsa_pair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| generate_key_pair().expect("generate RSA pair"))
}

/// Flip the lowest bit of the first byte of a hex field
#[allow(dead_code)]
pub fn flip_first_bit(hex_field: &str) -> String {
    let mut bytes = hex::decode(hex_field).expect("valid hex");
    bytes[0] ^= 0x01;
    hex::encode(bytes)
}

/// Flip the highest bit of the last byte of a hex field
#[allow(dead_code)]
pub fn flip_last_bit(hex_field: &str) -> String {
    let mut bytes = hex::decode(hex_field).expect("valid hex");
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    hex::encode(bytes)
}
