use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

/// Settings shared by every service binary.
///
/// Read from an optional `configuration` file, then from `APP__`-prefixed
/// environment variables (`APP__PORT`, `APP__LOG_LEVEL`).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::load_with_default_port(default_port())
    }

    /// Like [`Config::load`], but a service picks the port used when neither
    /// the file nor `APP__PORT` sets one.
    pub fn load_with_default_port(port: u16) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_env_source(port, app_environment())
    }

    /// Build from `env` instead of the process environment.
    pub fn from_env_source(default_port: u16, env: Environment) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .set_default("port", i64::from(default_port))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// `APP__`-prefixed environment source.
pub fn app_environment() -> Environment {
    Environment::with_prefix("APP").separator("__")
}
