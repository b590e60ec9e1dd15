use core_config::{env_or_default, AppInfo, ConfigError, FromEnv, StorageConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub storage: StorageConfig,
    pub environment: Environment,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = AppInfo::from_env()?;
        let storage = StorageConfig::from_env()?; // Defaults to the memory driver

        Ok(Self {
            environment: app.environment,
            app,
            storage,
            log_level: env_or_default("LOG_LEVEL", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let environment = Environment::Development;
        Self {
            app: AppInfo {
                name: "shadow-id".to_string(),
                version: "1.0.0".to_string(),
                environment,
            },
            storage: StorageConfig::default(),
            environment,
            log_level: "info".to_string(),
        }
    }
}
