// tests/config_tests.rs
use e2ee_vault::config::{from_toml_str, load};
use e2ee_vault::consts::DEFAULT_STREAM_CHUNK_SIZE;
use e2ee_vault::error::CoreError;

#[test]
fn test_empty_document_takes_defaults() {
    let config = from_toml_str("").unwrap();
    assert_eq!(config.logging.filter, "info");
    assert_eq!(config.streaming.chunk_size, DEFAULT_STREAM_CHUNK_SIZE);
}

#[test]
fn test_partial_document_overrides_only_what_it_names() {
    let config = from_toml_str(
        r#"
        [streaming]
        chunk_size = 4096
        "#,
    )
    .unwrap();
    assert_eq!(config.streaming.chunk_size, 4096);
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_full_document() {
    let config = from_toml_str(
        r#"
        [logging]
        filter = "e2ee_vault=debug"

        [streaming]
        chunk_size = 1048576
        "#,
    )
    .unwrap();
    assert_eq!(config.logging.filter, "e2ee_vault=debug");
    assert_eq!(config.streaming.chunk_size, 1 << 20);
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let err = from_toml_str("[streaming]\nchunk_size = 0\n").unwrap_err();
    assert!(matches!(err, CoreError::InvalidConfig(_)));
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    let err = from_toml_str("[streaming\nchunk_size = ").unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

#[test]
fn test_load_is_cached() {
    let a = load() as *const _;
    let b = load() as *const _;
    assert_eq!(a, b);
    assert!(load().streaming.chunk_size > 0);
}
