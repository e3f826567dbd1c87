// src/config.rs
//! Operational configuration — loaded once, never cryptographic
//!
//! Algorithm parameters live in `consts` and cannot be changed here. This
//! only covers logging and streaming buffer sizes.

use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::consts::DEFAULT_STREAM_CHUNK_SIZE;
use crate::error::{CoreError, Result};

/// Env var naming the TOML file to load
pub const CONFIG_ENV: &str = "E2EE_CONFIG";

/// Used when `E2EE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "e2ee.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: Logging,
    pub streaming: Streaming,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub filter: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Streaming {
    /// Read buffer for `encrypt_reader` / `decrypt_reader`, bytes
    pub chunk_size: usize,
}

impl Default for Streaming {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_STREAM_CHUNK_SIZE,
        }
    }
}

/// Parse and validate a TOML document. Missing sections take defaults.
pub fn from_toml_str(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    if config.streaming.chunk_size == 0 {
        return Err(CoreError::InvalidConfig(
            "streaming.chunk_size must be greater than zero".into(),
        ));
    }
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config> {
    from_toml_str(&std::fs::read_to_string(path)?)
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load config at first use — falls back to defaults if missing or invalid
pub fn load() -> &'static Config {
    CONFIG.get_or_init(|| {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let path = Path::new(&path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using built-in defaults");
            return Config::default();
        }

        match read_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unusable config");
                Config::default()
            }
        }
    })
}
