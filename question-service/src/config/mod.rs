use crate::services::prompt::DEFAULT_TEMPLATE;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Port the quiz backend expects the question service on.
pub const DEFAULT_PORT: u16 = 8000;
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "qwen3:8b";

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub ollama: OllamaSettings,
    pub prompt_template: String,
    /// OTLP collector for span export; local logs only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

impl OllamaSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl QuestionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load_with_default_port(DEFAULT_PORT)?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the service settings from `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()) == "prod";
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default, is_prod);

        let timeout_secs = match lookup("OLLAMA_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "OLLAMA_TIMEOUT_SECS must be a whole number of seconds, got {:?}: {}",
                    raw,
                    e
                ))
            })?),
            None => None,
        };

        Ok(QuestionConfig {
            common,
            ollama: OllamaSettings {
                base_url: get("OLLAMA_BASE_URL", Some(DEFAULT_OLLAMA_BASE_URL))?,
                model: get("OLLAMA_MODEL", Some(DEFAULT_OLLAMA_MODEL))?,
                timeout_secs,
            },
            prompt_template: lookup("QUESTION_PROMPT_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|s| !s.is_empty()),
        })
    }
}

fn get_env<F>(
    lookup: &F,
    key: &str,
    default: Option<&str>,
    is_prod: bool,
) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
