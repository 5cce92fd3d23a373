//! Runtime configuration.
//!
//! Loaded in layers:
//! 1. Default values in code
//! 2. An optional TOML file (`kardex.toml` unless another path is given)
//! 3. Environment variable overrides with the `KARDEX__` prefix, e.g.
//!    `KARDEX__ORDER_NUMBER__PREFIX=PV-`

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "kardex.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KardexConfig {
    pub order_number: OrderNumberConfig,
    pub actors: ActorConfig,
    pub status_log: StatusLogConfig,
    pub log: LogConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNumberConfig {
    /// Text placed before the padded number.
    pub prefix: String,
    /// Minimum digit count; shorter numbers are zero-padded.
    pub width: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Channel capacity of every collection actor.
    pub buffer_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLogConfig {
    pub capacity: usize,
    /// Also keep INFO events, not only warnings and errors.
    pub capture_info: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl Default for KardexConfig {
    fn default() -> Self {
        Self {
            order_number: OrderNumberConfig {
                prefix: "PED-".to_string(),
                width: 6,
            },
            actors: ActorConfig { buffer_size: 32 },
            status_log: StatusLogConfig {
                capacity: 200,
                capture_info: false,
            },
            log: LogConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
            auth: AuthConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}

impl KardexConfig {
    /// Defaults, then `kardex.toml` if present, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Defaults, then `path` if it exists, then the environment.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("KARDEX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Defaults overlaid with a TOML document. Ignores the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let loaded: Self = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let d = Self::default();
        Config::builder()
            .set_default("order_number.prefix", d.order_number.prefix)?
            .set_default("order_number.width", d.order_number.width as i64)?
            .set_default("actors.buffer_size", d.actors.buffer_size as i64)?
            .set_default("status_log.capacity", d.status_log.capacity as i64)?
            .set_default("status_log.capture_info", d.status_log.capture_info)?
            .set_default("log.level", d.log.level)?
            .set_default("log.format", "compact")?
            .set_default("auth.bcrypt_cost", d.auth.bcrypt_cost as i64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_number.prefix.is_empty() {
            return Err(ConfigError::Message("order_number.prefix must not be empty".into()));
        }
        if !(1..=12).contains(&self.order_number.width) {
            return Err(ConfigError::Message(format!(
                "order_number.width must be between 1 and 12, got {}",
                self.order_number.width
            )));
        }
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Message("actors.buffer_size must be positive".into()));
        }
        if self.status_log.capacity == 0 {
            return Err(ConfigError::Message("status_log.capacity must be positive".into()));
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Message(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }
        Ok(())
    }
}
