use crate::{env_or_default, env_parse_or_default, ConfigError, FromEnv};
use std::str::FromStr;

/// Storage backends the application knows how to build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageDriver {
    #[default]
    Memory,
}

impl FromStr for StorageDriver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageDriver::Memory),
            _ => Err(ConfigError::UnsupportedDriver(s.to_string())),
        }
    }
}

/// Storage configuration
///
/// Connection fields are read so a persistent driver can be added later;
/// the memory driver ignores them.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub driver: StorageDriver,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            driver: StorageDriver::Memory,
            host: "localhost".to_string(),
            port: 5432,
            name: "shadow_id".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            ssl_mode: "disable".to_string(),
        }
    }
}

impl FromEnv for StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            driver: env_or_default("DB_DRIVER", "memory").parse()?,
            host: env_or_default("DB_HOST", "localhost"),
            port: env_parse_or_default("DB_PORT", 5432)?,
            name: env_or_default("DB_NAME", "shadow_id"),
            user: env_or_default("DB_USER", "postgres"),
            password: env_or_default("DB_PASSWORD", ""),
            ssl_mode: env_or_default("DB_SSL_MODE", "disable"),
        })
    }
}
