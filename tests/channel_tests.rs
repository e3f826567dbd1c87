// tests/channel_tests.rs
mod common;
use common::{flip_first_bit, rsa_pair};

use e2ee_vault::error::CoreError;
use e2ee_vault::{
    decrypt_message, derive_shared_secret, encrypt_message, generate_ecdh_key_pair,
    EncryptedMessage,
};

#[test]
fn test_message_roundtrip() {
    let recipient = generate_ecdh_key_pair();

    for message in ["", "hi", "Meeting moved to 3pm — bring the affidavit"] {
        let envelope = encrypt_message(message, &recipient.public_key).unwrap();
        let plaintext = decrypt_message(&envelope, &recipient.private_key).unwrap();
        assert_eq!(plaintext, message);
    }
}

#[test]
fn test_envelope_field_shapes() {
    let recipient = generate_ecdh_key_pair();
    let envelope = encrypt_message("hello", &recipient.public_key).unwrap();

    assert_eq!(envelope.iv.len(), 32);
    assert_eq!(envelope.tag.len(), 32);
    assert_eq!(envelope.ciphertext.len(), 10);
    assert_eq!(envelope.ephemeral_public_key.len(), 130);
    assert_ne!(envelope.ephemeral_public_key, recipient.public_key);
}

#[test]
fn test_each_message_uses_fresh_ephemeral_key_and_iv() {
    let recipient = generate_ecdh_key_pair();
    let a = encrypt_message("same message", &recipient.public_key).unwrap();
    let b = encrypt_message("same message", &recipient.public_key).unwrap();

    assert_ne!(a.ephemeral_public_key, b.ephemeral_public_key);
    assert_ne!(a.iv, b.iv);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn test_shared_secret_agrees_in_both_directions() {
    let alice = generate_ecdh_key_pair();
    let bob = generate_ecdh_key_pair();

    let ab = derive_shared_secret(&alice.private_key, &bob.public_key).unwrap();
    let ba = derive_shared_secret(&bob.private_key, &alice.public_key).unwrap();
    assert_eq!(ab.expose_secret(), ba.expose_secret());

    let carol = generate_ecdh_key_pair();
    let ac = derive_shared_secret(&alice.private_key, &carol.public_key).unwrap();
    assert_ne!(ab.expose_secret(), ac.expose_secret());
}

#[test]
fn test_wrong_recipient_cannot_decrypt() {
    let bob = generate_ecdh_key_pair();
    let eve = generate_ecdh_key_pair();

    let envelope = encrypt_message("for bob only", &bob.public_key).unwrap();
    let result = decrypt_message(&envelope, &eve.private_key);
    assert!(matches!(result, Err(CoreError::AuthenticationFailed)));
}

#[test]
fn test_tampered_message_fails_authentication() {
    let bob = generate_ecdh_key_pair();
    let envelope = encrypt_message("do not alter", &bob.public_key).unwrap();

    let tampered = [
        EncryptedMessage {
            ciphertext: flip_first_bit(&envelope.ciphertext),
            ..envelope.clone()
        },
        EncryptedMessage {
            iv: flip_first_bit(&envelope.iv),
            ..envelope.clone()
        },
        EncryptedMessage {
            tag: flip_first_bit(&envelope.tag),
            ..envelope.clone()
        },
    ];

    for bad in &tampered {
        assert!(matches!(
            decrypt_message(bad, &bob.private_key),
            Err(CoreError::AuthenticationFailed)
        ));
    }
}

#[test]
fn test_swapped_ephemeral_key_fails() {
    let bob = generate_ecdh_key_pair();
    let a = encrypt_message("first", &bob.public_key).unwrap();
    let b = encrypt_message("second", &bob.public_key).unwrap();

    let mixed = EncryptedMessage {
        ephemeral_public_key: b.ephemeral_public_key,
        ..a
    };
    assert!(matches!(
        decrypt_message(&mixed, &bob.private_key),
        Err(CoreError::AuthenticationFailed)
    ));
}

#[test]
fn test_rsa_keys_are_not_ecdh_keys() {
    let rsa = rsa_pair();
    let ec = generate_ecdh_key_pair();

    let err = encrypt_message("hello", &rsa.public_key).unwrap_err();
    assert!(matches!(err, CoreError::InvalidKey(_)));

    let envelope = encrypt_message("hello", &ec.public_key).unwrap();
    let err = decrypt_message(&envelope, &rsa.private_key).unwrap_err();
    assert!(matches!(err, CoreError::InvalidKey(_)));
}

#[test]
fn test_point_not_on_curve_is_rejected() {
    let bob = generate_ecdh_key_pair();
    let mut bogus = String::from("04");
    bogus.push_str(&"11".repeat(64));

    let err = derive_shared_secret(&bob.private_key, &bogus).unwrap_err();
    assert!(matches!(err, CoreError::InvalidKey(_)));
}

#[test]
fn test_message_envelope_json_uses_wire_names() {
    let bob = generate_ecdh_key_pair();
    let envelope = encrypt_message("json", &bob.public_key).unwrap();

    let json = serde_json::to_value(&envelope).unwrap();
    assert!(json.get("ephemeralPublicKey").is_some());

    let restored: EncryptedMessage = serde_json::from_value(json).unwrap();
    assert_eq!(decrypt_message(&restored, &bob.private_key).unwrap(), "json");
}
