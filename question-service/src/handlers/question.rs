//! `GET /question/{prompt}/{number}`.

use crate::models::{QuestionNumber, QuestionParams, QuestionsEnvelope};
use crate::startup::AppState;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::Json;
use service_core::error::AppError;
use std::borrow::Cow;

/// Longest slice of generated text echoed into the logs.
const PREVIEW_CHARS: usize = 100;

/// Reads `{prompt}` and `{number}` from the last two path segments. Invalid
/// UTF-8 in a segment decodes to U+FFFD; a non-integer `number` answers 422
/// before the handler runs.
#[async_trait]
impl<S> FromRequestParts<S> for QuestionParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut segments = parts.uri.path().rsplit('/');
        let (Some(number), Some(prompt)) = (segments.next(), segments.next()) else {
            return Err(AppError::ValidationError(
                "expected /question/{prompt}/{number}".to_string(),
            ));
        };

        let number = decode_segment(number)
            .parse::<QuestionNumber>()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(QuestionParams {
            prompt: decode_segment(prompt).into_owned(),
            number,
        })
    }
}

fn decode_segment(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode_binary(raw.as_bytes()) {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

#[tracing::instrument(
    name = "question",
    skip_all,
    fields(prompt_len = params.prompt.len(), number = %params.number)
)]
pub async fn generate_questions(
    State(state): State<AppState>,
    params: QuestionParams,
) -> Result<Json<QuestionsEnvelope>, AppError> {
    tracing::debug!(prompt = %params.prompt, "Received question request");

    tracing::debug!("Calling question generator");
    let questions = state
        .generator
        .generate(&params.prompt, &params.number)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Question generation failed");
            AppError::from(e)
        })?;

    tracing::info!(
        response_len = questions.len(),
        preview = %preview(&questions, PREVIEW_CHARS),
        "Question generator responded"
    );

    tracing::debug!("Returning questions envelope");
    Ok(Json(QuestionsEnvelope { questions }))
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
