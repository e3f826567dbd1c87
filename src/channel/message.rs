// src/channel/message.rs
//! One-shot hybrid encryption: ephemeral ECDH → SHA-256 → AES-256-GCM
//!
//! There is no session. Every message carries its own single-use sender key,
//! so nothing here is persisted between calls. The envelope proves nothing
//! about who sent it; pair it with `sign`/`verify` for that.
//!
//! The sender's ephemeral scalar only ever exists as a k256 `EphemeralSecret`
//! and is wiped when it drops; it is never hex encoded.

use k256::ecdh::EphemeralSecret;
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::aliases::SymmetricKey32;
use crate::consts::{ALGORITHM, ECDH_CURVE, KEY_LENGTH};
use crate::crypto::aead::{open, seal};
use crate::envelope::EncryptedMessage;
use crate::error::Result;

use super::ecdh::{derive_shared_secret, encode_public_key, parse_public_key};

/// SHA-256 over the raw x-coordinate gives the message key
fn message_key(shared: &[u8]) -> SymmetricKey32 {
    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(&Sha256::digest(shared));
    SymmetricKey32::new(key)
}

/// Encrypt `message` for the holder of `recipient_public_key` (SEC1 hex)
pub fn encrypt_message(message: &str, recipient_public_key: &str) -> Result<EncryptedMessage> {
    let recipient = parse_public_key(recipient_public_key)?;

    let ephemeral = EphemeralSecret::random(&mut OsRng);
    let ephemeral_public_key = encode_public_key(&ephemeral.public_key());
    let shared = ephemeral.diffie_hellman(&recipient);
    let key = message_key(shared.raw_secret_bytes());

    let sealed = seal(&key, message.as_bytes())?;

    tracing::debug!(
        curve = ECDH_CURVE,
        algorithm = ALGORITHM,
        len = message.len(),
        "channel encrypt"
    );

    Ok(EncryptedMessage {
        ciphertext: hex::encode(&sealed.ciphertext),
        ephemeral_public_key,
        iv: hex::encode(sealed.iv),
        tag: hex::encode(sealed.tag),
    })
}

/// Recompute the shared secret from the envelope's ephemeral key and decrypt
pub fn decrypt_message(envelope: &EncryptedMessage, recipient_private_key: &str) -> Result<String> {
    let shared = derive_shared_secret(recipient_private_key, &envelope.ephemeral_public_key)?;
    let key = message_key(shared.expose_secret());

    let ciphertext = hex::decode(&envelope.ciphertext)?;
    let iv = hex::decode(&envelope.iv)?;
    let tag = hex::decode(&envelope.tag)?;

    let plaintext = open(&key, &ciphertext, &iv, &tag).inspect_err(|_| {
        tracing::debug!(curve = ECDH_CURVE, "channel decrypt rejected");
    })?;

    Ok(String::from_utf8(plaintext)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ecdh::generate_ecdh_key_pair;

    #[test]
    fn ephemeral_key_agrees_with_recipient_side_secret() {
        let recipient = generate_ecdh_key_pair();
        let envelope = encrypt_message("hello", &recipient.public_key).unwrap();

        assert!(parse_public_key(&envelope.ephemeral_public_key).is_ok());
        assert!(envelope.ephemeral_public_key.starts_with("04"));

        let shared =
            derive_shared_secret(&recipient.private_key, &envelope.ephemeral_public_key).unwrap();
        let key = message_key(shared.expose_secret());
        let opened = open(
            &key,
            &hex::decode(&envelope.ciphertext).unwrap(),
            &hex::decode(&envelope.iv).unwrap(),
            &hex::decode(&envelope.tag).unwrap(),
        )
        .unwrap();
        assert_eq!(opened, b"hello");
    }
}
