// src/channel/ecdh.rs
//! secp256k1 key agreement
//!
//! Keys cross the boundary as hex: private keys are the 32-byte scalar,
//! public keys are SEC1 points (uncompressed on output, either form accepted
//! on input).

use k256::ecdh::diffie_hellman;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use rand_core::OsRng;
use zeroize::{Zeroize, Zeroizing};

use crate::aliases::SharedSecret32;
use crate::envelope::KeyPair;
use crate::error::{CoreError, Result};

/// Generate a secp256k1 pair for Diffie–Hellman
pub fn generate_ecdh_key_pair() -> KeyPair {
    let secret = SecretKey::random(&mut OsRng);
    let public = secret.public_key();

    KeyPair {
        public_key: encode_public_key(&public),
        private_key: hex::encode(secret.to_bytes()),
    }
}

pub(crate) fn parse_secret_key(private_key: &str) -> Result<SecretKey> {
    let bytes = Zeroizing::new(
        hex::decode(private_key)
            .map_err(|_| CoreError::InvalidKey("EC private key is not hex".into()))?,
    );
    SecretKey::from_slice(&bytes)
        .map_err(|_| CoreError::InvalidKey("not a secp256k1 private key".into()))
}

/// Uncompressed SEC1 hex, the form every public key leaves this crate in
pub(crate) fn encode_public_key(public: &PublicKey) -> String {
    hex::encode(public.to_encoded_point(false).as_bytes())
}

pub(crate) fn parse_public_key(public_key: &str) -> Result<PublicKey> {
    let bytes = hex::decode(public_key)
        .map_err(|_| CoreError::InvalidKey("EC public key is not hex".into()))?;
    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|_| CoreError::InvalidKey("not a secp256k1 public key".into()))
}

/// Raw ECDH output (the shared point's x-coordinate).
///
/// Never use this as a cipher key directly; hash it first.
pub fn derive_shared_secret(private_key: &str, public_key: &str) -> Result<SharedSecret32> {
    let secret = parse_secret_key(private_key)?;
    let public = parse_public_key(public_key)?;

    let shared = diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    let mut raw = [0u8; 32];
    raw.copy_from_slice(shared.raw_secret_bytes());
    let secret = SharedSecret32::new(raw);
    raw.zeroize();
    Ok(secret)
}
