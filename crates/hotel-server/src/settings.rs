//! Runtime configuration, deserialised from `config.toml` and `HOTEL_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use hotel_core::channel::DigitCountValidator;
use hotel_intake::IntakeConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub intake:     IntakeSettings,
  #[serde(default)]
  pub channel:    ChannelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntakeSettings {
  pub timeout_ms:          Option<u64>,
  #[serde(default = "default_attempts")]
  pub max_insert_attempts: u32,
}

impl Default for IntakeSettings {
  fn default() -> Self {
    Self { timeout_ms: None, max_insert_attempts: default_attempts() }
  }
}

impl From<&IntakeSettings> for IntakeConfig {
  fn from(s: &IntakeSettings) -> Self {
    IntakeConfig {
      timeout:             s.timeout_ms.map(Duration::from_millis),
      max_insert_attempts: s.max_insert_attempts.max(1),
    }
  }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChannelSettings {
  pub min_digits: usize,
  pub max_digits: usize,
}

impl Default for ChannelSettings {
  fn default() -> Self {
    let d = DigitCountValidator::default();
    Self { min_digits: d.min_digits, max_digits: d.max_digits }
  }
}

impl From<&ChannelSettings> for DigitCountValidator {
  fn from(s: &ChannelSettings) -> Self {
    DigitCountValidator { min_digits: s.min_digits, max_digits: s.max_digits }
  }
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_attempts() -> u32 { IntakeConfig::default().max_insert_attempts }

/// Layer the TOML file (if present) under `HOTEL_*` environment variables.
///
/// Nested keys use a double underscore, e.g. `HOTEL_INTAKE__TIMEOUT_MS`.
pub fn load(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("HOTEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
