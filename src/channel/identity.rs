// src/channel/identity.rs
//! RSA identity keys: PKCS#1 v1.5 SHA-256 signatures and OAEP-SHA256 wrapping
//!
//! Independent of the ECDH channel. OAEP is for small payloads only (wrapped
//! keys, short credentials); the limit is `modulus_bytes - 2 * 32 - 2`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand_core::OsRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::consts::RSA_MODULUS_BITS;
use crate::envelope::KeyPair;
use crate::error::{CoreError, Result};

/// SHA-256 output size, charged twice by OAEP padding
const OAEP_HASH_LEN: usize = 32;

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .map_err(|_| CoreError::InvalidKey("not a PKCS#8 RSA private key".into()))
}

fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|_| CoreError::InvalidKey("not an SPKI RSA public key".into()))
}

/// Largest plaintext `rsa_encrypt` accepts for this key
pub fn max_oaep_payload(public_key: &RsaPublicKey) -> usize {
    public_key.size().saturating_sub(2 * OAEP_HASH_LEN + 2)
}

/// Generate an RSA-4096 identity pair, PEM encoded (SPKI public, PKCS#8 private).
///
/// Takes seconds; do not call on a request path.
pub fn generate_key_pair() -> Result<KeyPair> {
    tracing::debug!(bits = RSA_MODULUS_BITS, "generating RSA key pair");

    let private = RsaPrivateKey::new(&mut OsRng, RSA_MODULUS_BITS)
        .map_err(|e| CoreError::KeyGeneration(e.to_string()))?;
    let public = RsaPublicKey::from(&private);

    let private_key = private
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CoreError::Encoding(format!("PKCS#8 encoding failed: {e}")))?;
    let public_key = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CoreError::Encoding(format!("SPKI encoding failed: {e}")))?;

    Ok(KeyPair {
        public_key,
        private_key: private_key.as_str().to_owned(),
    })
}

/// Sign `data` with an RSA private key (PEM) → hex signature
pub fn sign(data: impl AsRef<[u8]>, private_key: &str) -> Result<String> {
    let signing_key = SigningKey::<Sha256>::new(parse_private_key(private_key)?);
    let signature = signing_key
        .try_sign(data.as_ref())
        .map_err(|e| CoreError::Signing(e.to_string()))?;
    Ok(hex::encode(signature.to_bytes()))
}

/// `Ok(false)` for any signature that does not check out, including one that
/// is not even hex. Errors only when the public key itself is malformed.
pub fn verify(data: impl AsRef<[u8]>, signature: &str, public_key: &str) -> Result<bool> {
    let verifying_key = VerifyingKey::<Sha256>::new(parse_public_key(public_key)?);

    let Ok(raw) = hex::decode(signature) else {
        return Ok(false);
    };
    let Ok(signature) = Signature::try_from(raw.as_slice()) else {
        return Ok(false);
    };

    Ok(verifying_key.verify(data.as_ref(), &signature).is_ok())
}

/// RSA-OAEP(SHA-256) encrypt a small UTF-8 payload → base64
pub fn rsa_encrypt(data: &str, public_key: &str) -> Result<String> {
    let public = parse_public_key(public_key)?;
    let max = max_oaep_payload(&public);
    if data.len() > max {
        return Err(CoreError::PayloadTooLarge {
            max,
            actual: data.len(),
        });
    }

    // size is already checked, so only the RNG can fail here
    let ciphertext = public
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), data.as_bytes())
        .map_err(|e| CoreError::Encryption(e.to_string()))?;
    Ok(STANDARD.encode(ciphertext))
}

/// Inverse of `rsa_encrypt`. Any padding failure is `AuthenticationFailed`.
pub fn rsa_decrypt(ciphertext: &str, private_key: &str) -> Result<String> {
    let private = parse_private_key(private_key)?;
    let raw = STANDARD.decode(ciphertext)?;

    let plaintext = private
        .decrypt(Oaep::new::<Sha256>(), &raw)
        .map_err(|_| CoreError::AuthenticationFailed)?;
    Ok(String::from_utf8(plaintext)?)
}
