#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tlumacz::error_log::ErrorLog;
use tlumacz::presenter::{Presenter, SharedBuffer};
use tlumacz::translate::{
    DetectionResult, GatewayError, RemoteFailure, TranslateGateway, TranslationOutcome,
};
use tlumacz::Orchestrator;

/// Gateway returning canned results and recording every call
#[derive(Default)]
pub struct RecordingGateway {
    pub detection: Option<DetectionResult>,
    pub translation: Option<String>,
    pub detect_calls: Mutex<Vec<String>>,
    pub translate_calls: Mutex<Vec<(String, String)>>,
}

impl RecordingGateway {
    pub fn detecting(language: &str, confidence: f32) -> Self {
        Self {
            detection: Some(DetectionResult::new(language, confidence)),
            translation: Some("translated".to_string()),
            ..Self::default()
        }
    }

    pub fn failing_detection() -> Self {
        Self::default()
    }

    pub fn failing_translation(language: &str) -> Self {
        Self {
            detection: Some(DetectionResult::new(language, 0.9)),
            translation: None,
            ..Self::default()
        }
    }

    pub fn detect_count(&self) -> usize {
        self.detect_calls.lock().unwrap().len()
    }

    pub fn translate_calls(&self) -> Vec<(String, String)> {
        self.translate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslateGateway for RecordingGateway {
    async fn detect_language(&self, text: &str) -> Result<DetectionResult, GatewayError> {
        self.detect_calls.lock().unwrap().push(text.to_string());
        self.detection.clone().ok_or_else(|| {
            GatewayError::Detection(RemoteFailure::Credentials("no credentials".to_string()))
        })
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome, GatewayError> {
        self.translate_calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_language.to_string()));
        match &self.translation {
            Some(translated) => Ok(TranslationOutcome {
                original_text: text.to_string(),
                translated_text: translated.clone(),
                target_language: target_language.to_string(),
            }),
            None => Err(GatewayError::Translation(RemoteFailure::Status {
                status: 429,
                body: "quota exceeded".to_string(),
            })),
        }
    }
}

pub struct Harness {
    pub gateway: Arc<RecordingGateway>,
    pub presenter: Arc<Presenter>,
    pub output: SharedBuffer,
    pub error_log: ErrorLog,
    pub orchestrator: Orchestrator,
    _dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(gateway: RecordingGateway) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(gateway);
        let (presenter, output) = Presenter::buffered();
        let presenter = Arc::new(presenter);
        let error_log = ErrorLog::new(dir.path().join("error.log"));
        let orchestrator = Orchestrator::new(gateway.clone(), presenter.clone(), error_log.clone());
        Self {
            gateway,
            presenter,
            output,
            error_log,
            orchestrator,
            _dir: dir,
        }
    }

    pub fn error_log_contents(&self) -> Option<String> {
        std::fs::read_to_string(self.error_log.path()).ok()
    }
}
