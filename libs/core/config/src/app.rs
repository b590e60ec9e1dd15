use crate::{env_or_default, ConfigError, Environment, FromEnv};
use serde::Serialize;

/// Identity of the running application, reported to the shell
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    #[serde(rename = "env", serialize_with = "serialize_environment")]
    pub environment: Environment,
}

fn serialize_environment<S: serde::Serializer>(
    environment: &Environment,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(environment.as_str())
}

impl FromEnv for AppInfo {
    /// Reads from environment variables with defaults:
    /// - APP_NAME: defaults to "shadow-id"
    /// - APP_VERSION: defaults to "1.0.0"
    /// - APP_ENV: see [`Environment::from_env`]
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            name: env_or_default("APP_NAME", "shadow-id"),
            version: env_or_default("APP_VERSION", "1.0.0"),
            environment: Environment::from_env(),
        })
    }
}
