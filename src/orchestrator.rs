use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::TranslateConfig;
use crate::error_log::ErrorLog;
use crate::presenter::Presenter;
use crate::translate::{DetectionResult, GatewayError, TranslateGateway, TranslationOutcome};

/// Returned in place of the underlying failure when detection is unavailable
pub const SENTINEL_DETECTION_UNAVAILABLE: &str =
    "Translation unavailable: the language of the text could not be detected.";

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("{}", SENTINEL_DETECTION_UNAVAILABLE)]
    DetectionUnavailable,
    #[error(transparent)]
    Translation(#[from] GatewayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Detected,
}

/// Detects the language of a text and translates it across the configured pair.
///
/// Text in `source_language` goes to `target_language`; anything else goes to
/// `source_language`.
pub struct Orchestrator {
    gateway: Arc<dyn TranslateGateway>,
    presenter: Arc<Presenter>,
    error_log: ErrorLog,
    source_language: String,
    target_language: String,
    detection: Option<DetectionResult>,
    outcome: Option<TranslationOutcome>,
}

impl Orchestrator {
    pub fn new(
        gateway: Arc<dyn TranslateGateway>,
        presenter: Arc<Presenter>,
        error_log: ErrorLog,
    ) -> Self {
        let defaults = TranslateConfig::default();
        Self {
            gateway,
            presenter,
            error_log,
            source_language: defaults.source_language,
            target_language: defaults.target_language,
            detection: None,
            outcome: None,
        }
    }

    pub fn with_languages(mut self, config: &TranslateConfig) -> Self {
        self.set_source_language(&config.source_language);
        self.set_target_language(&config.target_language);
        self
    }

    pub fn set_source_language(&mut self, code: &str) {
        self.source_language = code.trim().to_lowercase();
    }

    pub fn set_target_language(&mut self, code: &str) {
        self.target_language = code.trim().to_lowercase();
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn last_detection(&self) -> Option<&DetectionResult> {
        self.detection.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&TranslationOutcome> {
        self.outcome.as_ref()
    }

    pub fn state(&self) -> State {
        if self.detection.is_some() {
            State::Detected
        } else {
            State::Idle
        }
    }

    /// Pick the translation target for a detection.
    ///
    /// Binary rule: only an exact match on the source code selects the target
    /// code; every other language, English included, selects the source code.
    pub fn select_target(&self, detection: &DetectionResult) -> &str {
        if detection.language.eq_ignore_ascii_case(&self.source_language) {
            &self.target_language
        } else {
            &self.source_language
        }
    }

    /// Detect the language of `text`, reporting the result on the console.
    ///
    /// Failures are written to the error log and collapsed into
    /// [`OrchestratorError::DetectionUnavailable`].
    pub async fn detect(&mut self, text: &str) -> Result<DetectionResult, OrchestratorError> {
        self.detection = None;

        match self.gateway.detect_language(text).await {
            Ok(detection) => {
                info!(
                    "Detected language: {} ({:.2})",
                    detection.language, detection.confidence
                );
                self.presenter.info(&format!(
                    "Detected language: {} (confidence {:.1}%)",
                    detection.language,
                    detection.confidence * 100.0
                ));
                self.detection = Some(detection.clone());
                Ok(detection)
            }
            Err(e) => {
                error!("Language detection failed: {}", e);
                self.report_failure("language detection", &e);
                Err(OrchestratorError::DetectionUnavailable)
            }
        }
    }

    /// Detect, then translate `text` to the complementary language.
    pub async fn translate(&mut self, text: &str) -> Result<TranslationOutcome, OrchestratorError> {
        let detection = self.detect(text).await?;
        let target = self.select_target(&detection).to_string();
        debug!(
            "Translating from {} to {}",
            detection.language, target
        );

        let outcome = self.gateway.translate(text, &target).await?;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn report_failure(&self, operation: &str, err: &GatewayError) {
        let summary = format!("Error during {}: {}", operation, err.remote());
        match self.error_log.record(operation, err) {
            Ok(()) => self.presenter.alert(&format!(
                "{} (details in {})",
                summary,
                self.error_log.path().display()
            )),
            Err(log_err) => {
                error!("{:#}", log_err);
                self.presenter.alert(&summary);
            }
        }
    }
}
