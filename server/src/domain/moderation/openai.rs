//! OpenAI moderation endpoint client
//!
//! `POST {base_url}/v1/moderations` with `{"input": text}`; the text is unsafe
//! when any returned result has `flagged = true`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ContentClassifier, ModerationError};
use crate::core::config::ModerationConfig;
use crate::core::constants::{MODERATION_ENDPOINT_PATH, MODERATION_RETRY_BASE_DELAY_MS};
use crate::utils::retry::retry_with_backoff_async;

#[derive(Serialize)]
struct ModerationRequest<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct ModerationResponse {
    results: Vec<ModerationResult>,
}

#[derive(Deserialize)]
struct ModerationResult {
    flagged: bool,
}

pub struct OpenAiModerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: Option<String>,
    max_attempts: u32,
}

impl OpenAiModerator {
    pub fn new(config: &ModerationConfig) -> Result<Self, ModerationError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ModerationError::Setup("moderation API key is not set".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModerationError::Setup(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}{}",
                config.base_url.trim_end_matches('/'),
                MODERATION_ENDPOINT_PATH
            ),
            api_key,
            model: config.model.clone(),
            max_attempts: config.max_attempts.max(1),
        })
    }

    async fn classify_once(&self, text: &str) -> Result<bool, ModerationError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest {
                input: text,
                model: self.model.as_deref(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModerationError::BadStatus(status));
        }

        let body: ModerationResponse = response
            .json()
            .await
            .map_err(|e| ModerationError::InvalidResponse(e.to_string()))?;

        if body.results.is_empty() {
            return Err(ModerationError::InvalidResponse(
                "response contained no results".to_string(),
            ));
        }

        Ok(!body.results.iter().any(|r| r.flagged))
    }
}

#[async_trait]
impl ContentClassifier for OpenAiModerator {
    async fn is_safe(&self, text: &str) -> Result<bool, ModerationError> {
        retry_with_backoff_async(
            self.max_attempts,
            MODERATION_RETRY_BASE_DELAY_MS,
            ModerationError::is_transient,
            || self.classify_once(text),
        )
        .await
        .map_err(|(e, attempts)| {
            tracing::warn!(error = %e, attempts, "Moderation request failed");
            e
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FailPolicy, ModerationProvider};
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone)]
    struct MockState {
        calls: Arc<AtomicU32>,
        /// Requests answered with 503 before the real answer
        failures_before_success: u32,
    }

    async fn moderations(
        State(state): State<MockState>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let call = state.calls.fetch_add(1, Ordering::SeqCst);
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk-test") {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
        }
        if call < state.failures_before_success {
            return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
        }
        let input = body["input"].as_str().unwrap_or_default();
        let flagged = input.contains("attack");
        (
            StatusCode::OK,
            Json(json!({
                "id": "modr-1",
                "model": "omni-moderation-latest",
                "results": [{ "flagged": flagged, "categories": {} }]
            })),
        )
    }

    async fn spawn_mock(failures_before_success: u32) -> (String, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let state = MockState {
            calls: calls.clone(),
            failures_before_success,
        };
        let app = Router::new()
            .route("/v1/moderations", post(moderations))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), calls)
    }

    fn config(base_url: String, api_key: &str, max_attempts: u32) -> ModerationConfig {
        ModerationConfig {
            provider: ModerationProvider::Openai,
            api_key: Some(api_key.to_string()),
            base_url,
            model: None,
            timeout_secs: 5,
            max_attempts,
            fail_policy: FailPolicy::Closed,
            screen_updates: true,
        }
    }

    #[tokio::test]
    async fn test_safe_and_flagged_text() {
        let (base_url, _) = spawn_mock(0).await;
        let moderator = OpenAiModerator::new(&config(base_url, "sk-test", 1)).unwrap();

        assert!(moderator.is_safe("print(1)").await.unwrap());
        assert!(!moderator.is_safe("how to attack a server").await.unwrap());
    }

    #[tokio::test]
    async fn test_retries_server_errors() {
        let (base_url, calls) = spawn_mock(1).await;
        let moderator = OpenAiModerator::new(&config(base_url, "sk-test", 2)).unwrap();

        assert!(moderator.is_safe("hello").await.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let (base_url, calls) = spawn_mock(10).await;
        let moderator = OpenAiModerator::new(&config(base_url, "sk-test", 2)).unwrap();

        let err = moderator.is_safe("hello").await.unwrap_err();
        assert!(matches!(err, ModerationError::BadStatus(s) if s == StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_auth_failure_is_not_retried() {
        let (base_url, calls) = spawn_mock(0).await;
        let moderator = OpenAiModerator::new(&config(base_url, "sk-wrong", 3)).unwrap();

        let err = moderator.is_safe("hello").await.unwrap_err();
        assert!(matches!(err, ModerationError::BadStatus(s) if s == StatusCode::UNAUTHORIZED));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let moderator =
            OpenAiModerator::new(&config(format!("http://{}", addr), "sk-test", 1)).unwrap();
        assert!(moderator.is_safe("hello").await.is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let mut cfg = config("http://localhost".to_string(), "x", 1);
        cfg.api_key = None;
        assert!(matches!(
            OpenAiModerator::new(&cfg),
            Err(ModerationError::Setup(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let moderator =
            OpenAiModerator::new(&config("https://api.example.com/".to_string(), "k", 1)).unwrap();
        assert_eq!(moderator.endpoint, "https://api.example.com/v1/moderations");
    }
}
