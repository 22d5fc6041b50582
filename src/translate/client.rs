use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::GatewayConfig;
use super::interface::{
    DetectionResult, GatewayError, RemoteFailure, TranslateGateway, TranslationOutcome,
};
use super::session::{LazySession, SessionSettings};

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    #[serde(default)]
    detections: Vec<Vec<Detection>>,
}

#[derive(Debug, Deserialize)]
struct Detection {
    language: String,
    #[serde(default)]
    confidence: f32,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

/// Client for the Google Cloud Translation REST API (v2)
pub struct GoogleTranslateClient {
    base_url: String,
    session: LazySession,
}

impl GoogleTranslateClient {
    pub fn new(config: &GatewayConfig) -> Self {
        let settings = SessionSettings {
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        };
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: LazySession::new(settings),
        }
    }

    pub fn session(&self) -> &LazySession {
        &self.session
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, RemoteFailure>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        let session = self.session.acquire().await?;

        let response = session
            .prepare(session.http.post(&url))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| RemoteFailure::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TranslateGateway for GoogleTranslateClient {
    async fn detect_language(&self, text: &str) -> Result<DetectionResult, GatewayError> {
        debug!("Sending detection request: chars={}", text.chars().count());

        let response: DetectResponse = self
            .post("/language/translate/v2/detect", &DetectRequest { q: text })
            .await
            .map_err(|e| {
                error!("Language detection failed: {}", e);
                GatewayError::Detection(e)
            })?;

        let detection = response
            .data
            .detections
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| {
                GatewayError::Detection(RemoteFailure::Malformed(
                    "no detections returned".to_string(),
                ))
            })?;

        debug!(
            "Detection successful: language={}, confidence={}",
            detection.language, detection.confidence
        );
        Ok(DetectionResult::new(detection.language, detection.confidence))
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome, GatewayError> {
        debug!("Sending translation request: target={}", target_language);

        let request = TranslateRequest {
            q: text,
            target: target_language,
            format: "text",
        };
        let response: TranslateResponse = self
            .post("/language/translate/v2", &request)
            .await
            .map_err(|e| {
                error!("Translation failed: {}", e);
                GatewayError::Translation(e)
            })?;

        let translation = response.data.translations.into_iter().next().ok_or_else(|| {
            GatewayError::Translation(RemoteFailure::Malformed(
                "no translations returned".to_string(),
            ))
        })?;

        if let Some(source) = &translation.detected_source_language {
            debug!("Service saw source language: {}", source);
        }

        Ok(TranslationOutcome {
            original_text: text.to_string(),
            translated_text: translation.translated_text,
            target_language: target_language.to_string(),
        })
    }
}
