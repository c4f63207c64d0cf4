//! Application startup and lifecycle management.
//!
//! Builds the HTTP router around an injected [`QuestionGenerator`] and runs it
//! until a shutdown signal arrives.

use crate::config::QuestionConfig;
use crate::handlers::{generate_questions, health_check, readiness_check};
use crate::services::providers::ollama::{OllamaConfig, OllamaQuestionGenerator};
use crate::services::{PromptBuilder, QuestionGenerator};
use axum::{body::Body, http::Uri, middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, request_span};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn QuestionGenerator>,
}

/// Build the HTTP router for the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/question/:prompt/:number", get(generate_questions))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
        .layer(middleware::from_fn(request_id_middleware))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Ollama generator described by `config`.
    pub async fn build(config: QuestionConfig) -> Result<Self, AppError> {
        let ollama_config = OllamaConfig {
            base_url: config.ollama.base_url.clone(),
            model: config.ollama.model.clone(),
            timeout: config.ollama.timeout(),
        };
        let generator = OllamaQuestionGenerator::new(
            ollama_config,
            PromptBuilder::new(config.prompt_template.clone()),
        )
        .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        tracing::info!(
            base_url = %config.ollama.base_url,
            model = %config.ollama.model,
            "Initialized Ollama question generator"
        );

        Self::build_with_generator(config, Arc::new(generator)).await
    }

    /// Build the application around an already constructed generator.
    pub async fn build_with_generator(
        config: QuestionConfig,
        generator: Arc<dyn QuestionGenerator>,
    ) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Question service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { generator },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockQuestionGenerator;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn app_with(mock: Arc<MockQuestionGenerator>) -> Router {
        router(AppState { generator: mock })
    }

    #[tokio::test]
    async fn question_wraps_generator_output() {
        let mock = Arc::new(MockQuestionGenerator::returning("Q1?"));
        let (status, body) = get_json(app_with(mock.clone()), "/question/hello/3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "questions": "Q1?" }));
        assert_eq!(mock.calls(), vec![("hello".to_string(), "3".to_string())]);
    }

    #[tokio::test]
    async fn non_integer_number_is_422_without_generator_call() {
        let mock = Arc::new(MockQuestionGenerator::returning("Q1?"));
        let (status, body) = get_json(app_with(mock.clone()), "/question/hello/abc").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Validation error");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn fractional_number_is_rejected() {
        let mock = Arc::new(MockQuestionGenerator::returning("Q1?"));
        let (status, _) = get_json(app_with(mock.clone()), "/question/hello/2.5").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn generator_failure_is_opaque_500() {
        let mock = Arc::new(MockQuestionGenerator::failing("ollama is down"));
        let (status, body) = get_json(app_with(mock.clone()), "/question/hello/3").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn percent_encoded_prompt_is_decoded() {
        let mock = Arc::new(MockQuestionGenerator::returning("ok"));
        let (status, _) = get_json(
            app_with(mock.clone()),
            "/question/%D0%98%D1%81%D1%82%D0%BE%D1%80%D0%B8%D1%8F%20%D0%A0%D0%B8%D0%BC%D0%B0/10",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(mock.calls(), vec![("История Рима".to_string(), "10".to_string())]);
    }

    #[tokio::test]
    async fn number_is_forwarded_verbatim() {
        let mock = Arc::new(MockQuestionGenerator::returning("ok"));
        let app = app_with(mock.clone());

        let (status, _) = get_json(app.clone(), "/question/topic/-5").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(app, "/question/topic/9000000000").await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(
            mock.calls(),
            vec![
                ("topic".to_string(), "-5".to_string()),
                ("topic".to_string(), "9000000000".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn number_beyond_64_bits_is_accepted_and_forwarded_exactly() {
        let mock = Arc::new(MockQuestionGenerator::returning("Q1?"));
        let (status, body) =
            get_json(app_with(mock.clone()), "/question/hello/99999999999999999999").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "questions": "Q1?" }));
        assert_eq!(
            mock.calls(),
            vec![("hello".to_string(), "99999999999999999999".to_string())]
        );
    }

    #[tokio::test]
    async fn invalid_utf8_in_prompt_is_replaced_not_rejected() {
        let mock = Arc::new(MockQuestionGenerator::returning("ok"));
        let (status, _) = get_json(app_with(mock.clone()), "/question/a%FFb/3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            mock.calls(),
            vec![("a\u{FFFD}b".to_string(), "3".to_string())]
        );
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let mock = Arc::new(MockQuestionGenerator::returning("ok"));
        let (status, _) = get_json(app_with(mock.clone()), "/question/hello").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let mock = Arc::new(MockQuestionGenerator::returning("ok"));
        let response = app_with(mock)
            .oneshot(
                Request::builder()
                    .uri("/question/hello/1")
                    .header("x-request-id", "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn readiness_reflects_generator_health() {
        let healthy = Arc::new(MockQuestionGenerator::returning("ok"));
        let (status, _) = get_json(app_with(healthy), "/ready").await;
        assert_eq!(status, StatusCode::OK);

        let failing = Arc::new(MockQuestionGenerator::failing("down"));
        let (status, _) = get_json(app_with(failing), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
