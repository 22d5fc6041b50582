use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most likely language of a text, as reported by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub language: String,
    /// Normalised to `[0, 1]`
    pub confidence: f32,
}

impl DetectionResult {
    pub fn new(language: impl Into<String>, confidence: f32) -> Self {
        Self {
            language: language.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
}

/// Why a remote call could not complete
#[derive(Debug, Error)]
pub enum RemoteFailure {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("credentials unavailable: {0}")]
    Credentials(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("language detection failed")]
    Detection(#[source] RemoteFailure),
    #[error("translation failed")]
    Translation(#[source] RemoteFailure),
}

impl GatewayError {
    pub fn remote(&self) -> &RemoteFailure {
        match self {
            GatewayError::Detection(failure) | GatewayError::Translation(failure) => failure,
        }
    }
}

/// Remote translation service, consumed as two operations
#[async_trait]
pub trait TranslateGateway: Send + Sync {
    /// Identify the language of `text`
    async fn detect_language(&self, text: &str) -> Result<DetectionResult, GatewayError>;

    /// Translate `text` into the language identified by `target_language`
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - ISO 639-1 code such as `en` or `pl`
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome, GatewayError>;
}
