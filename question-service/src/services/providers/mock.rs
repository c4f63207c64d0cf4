//! Mock provider implementation for testing.

use super::{ProviderError, QuestionGenerator};
use crate::models::QuestionNumber;
use async_trait::async_trait;
use std::sync::Mutex;

enum Script {
    Respond(String),
    Fail(String),
}

/// Scripted question generator that records every call it receives.
pub struct MockQuestionGenerator {
    script: Script,
    healthy: bool,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockQuestionGenerator {
    /// Always answers with `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            script: Script::Respond(text.into()),
            healthy: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
            healthy: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(prompt, number)` of every `generate` call so far, oldest first.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionGenerator for MockQuestionGenerator {
    async fn generate(
        &self,
        prompt: &str,
        number: &QuestionNumber,
    ) -> Result<String, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), number.to_string()));
        }

        match &self.script {
            Script::Respond(text) => Ok(text.clone()),
            Script::Fail(message) => Err(ProviderError::ApiError(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock question generator is failing".to_string(),
            ))
        }
    }
}
