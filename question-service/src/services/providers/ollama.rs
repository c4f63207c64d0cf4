//! Ollama provider implementation.
//!
//! Implements question generation against an Ollama-compatible
//! `POST /api/generate` endpoint, non-streaming.

use super::{ProviderError, QuestionGenerator};
use crate::models::QuestionNumber;
use crate::services::prompt::PromptBuilder;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama provider configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server root, e.g. `http://localhost:11434`.
    pub base_url: String,
    pub model: String,
    /// Per-request deadline. `None` waits for as long as the model takes.
    pub timeout: Option<Duration>,
}

/// Ollama question generator.
pub struct OllamaQuestionGenerator {
    config: OllamaConfig,
    prompts: PromptBuilder,
    client: Client,
}

impl OllamaQuestionGenerator {
    pub fn new(config: OllamaConfig, prompts: PromptBuilder) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            prompts,
            client,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl QuestionGenerator for OllamaQuestionGenerator {
    async fn generate(
        &self,
        prompt: &str,
        number: &QuestionNumber,
    ) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt: self.prompts.render(prompt, number),
            stream: false,
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "Sending request to Ollama"
        );

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "Ollama API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Ok(api_response.response)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("tags"))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Ollama health check returned {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Ollama API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
