//! Content safety gate
//!
//! User-authored text (snippet and comment content) is classified before it
//! is persisted. The classifier is a trait so the external provider can be
//! swapped (or stubbed in tests); `ContentGate` applies the configured
//! failure policy when the classifier cannot give an answer.

mod openai;

pub use openai::OpenAiModerator;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::error::DomainError;
use crate::core::config::{FailPolicy, ModerationConfig, ModerationProvider};

/// Transport failure talking to the classification service
#[derive(Error, Debug)]
pub enum ModerationError {
    #[error("Moderation request timed out")]
    Timeout,

    #[error("Moderation HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Moderation service returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("Moderation service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Moderation client setup failed: {0}")]
    Setup(String),
}

impl ModerationError {
    /// Worth another attempt: timeouts, server errors and throttling
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::BadStatus(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            Self::Http(_) | Self::InvalidResponse(_) | Self::Setup(_) => false,
        }
    }
}

impl From<reqwest::Error> for ModerationError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(value)
        }
    }
}

/// Classifies free text as safe or unsafe
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    /// `Ok(true)` when no category is flagged
    async fn is_safe(&self, text: &str) -> Result<bool, ModerationError>;

    fn provider_name(&self) -> &'static str;
}

/// Classifies everything as safe (`moderation.provider = none`)
pub struct AllowAllClassifier;

#[async_trait]
impl ContentClassifier for AllowAllClassifier {
    async fn is_safe(&self, _text: &str) -> Result<bool, ModerationError> {
        Ok(true)
    }

    fn provider_name(&self) -> &'static str {
        "none"
    }
}

/// Classifier plus failure policy
pub struct ContentGate {
    classifier: Arc<dyn ContentClassifier>,
    fail_policy: FailPolicy,
}

impl ContentGate {
    pub fn new(classifier: Arc<dyn ContentClassifier>, fail_policy: FailPolicy) -> Self {
        Self {
            classifier,
            fail_policy,
        }
    }

    /// Build the gate for the configured provider
    pub fn from_config(config: &ModerationConfig) -> Result<Self, ModerationError> {
        let classifier: Arc<dyn ContentClassifier> = match config.provider {
            ModerationProvider::Openai => Arc::new(OpenAiModerator::new(config)?),
            ModerationProvider::None => Arc::new(AllowAllClassifier),
        };
        tracing::debug!(
            provider = classifier.provider_name(),
            fail_policy = %config.fail_policy,
            "Content gate initialized"
        );
        Ok(Self::new(classifier, config.fail_policy))
    }

    pub fn provider_name(&self) -> &'static str {
        self.classifier.provider_name()
    }

    /// Pass only if the text is classified safe.
    ///
    /// Unsafe text yields `ContentRejected`. If the classifier fails, `closed`
    /// yields `GateUnavailable` and `open` lets the text through with a warning.
    pub async fn screen(&self, text: &str) -> Result<(), DomainError> {
        match self.classifier.is_safe(text).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::debug!(
                    provider = self.classifier.provider_name(),
                    "Content flagged by classifier"
                );
                Err(DomainError::ContentRejected)
            }
            Err(e) => match self.fail_policy {
                FailPolicy::Closed => Err(DomainError::GateUnavailable(e)),
                FailPolicy::Open => {
                    tracing::warn!(
                        error = %e,
                        provider = self.classifier.provider_name(),
                        "Classifier unavailable, persisting unchecked content (fail-open)"
                    );
                    Ok(())
                }
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{KeywordClassifier, UnreachableClassifier};
    use super::*;

    #[tokio::test]
    async fn test_allow_all_passes() {
        let gate = ContentGate::new(Arc::new(AllowAllClassifier), FailPolicy::Closed);
        assert!(gate.screen("anything").await.is_ok());
        assert_eq!(gate.provider_name(), "none");
    }

    #[tokio::test]
    async fn test_flagged_text_is_rejected() {
        let gate = ContentGate::new(Arc::new(KeywordClassifier::new("evil")), FailPolicy::Open);
        assert!(gate.screen("print(1)").await.is_ok());
        assert!(matches!(
            gate.screen("evil payload").await,
            Err(DomainError::ContentRejected)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_fails_closed() {
        let gate = ContentGate::new(Arc::new(UnreachableClassifier), FailPolicy::Closed);
        assert!(matches!(
            gate.screen("text").await,
            Err(DomainError::GateUnavailable(ModerationError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_fails_open() {
        let gate = ContentGate::new(Arc::new(UnreachableClassifier), FailPolicy::Open);
        assert!(gate.screen("text").await.is_ok());
    }

    #[test]
    fn test_is_transient() {
        assert!(ModerationError::Timeout.is_transient());
        assert!(ModerationError::BadStatus(reqwest::StatusCode::BAD_GATEWAY).is_transient());
        assert!(
            ModerationError::BadStatus(reqwest::StatusCode::TOO_MANY_REQUESTS).is_transient()
        );
        assert!(!ModerationError::BadStatus(reqwest::StatusCode::UNAUTHORIZED).is_transient());
        assert!(!ModerationError::InvalidResponse("bad json".into()).is_transient());
    }

    #[test]
    fn test_from_config_none_provider() {
        let config = ModerationConfig {
            provider: ModerationProvider::None,
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: None,
            timeout_secs: 1,
            max_attempts: 1,
            fail_policy: FailPolicy::Closed,
            screen_updates: true,
        };
        let gate = ContentGate::from_config(&config).unwrap();
        assert_eq!(gate.provider_name(), "none");
    }
}
