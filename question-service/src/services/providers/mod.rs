//! Question generator abstractions and implementations.
//!
//! The HTTP layer only sees [`QuestionGenerator`], so the Ollama backend can be
//! swapped for the scripted mock in tests.

pub mod mock;
pub mod ollama;

use crate::models::QuestionNumber;
use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for generator operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Turns a topic prompt and a count into generated question text.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate text for `prompt`. `number` is forwarded as given.
    async fn generate(
        &self,
        prompt: &str,
        number: &QuestionNumber,
    ) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
