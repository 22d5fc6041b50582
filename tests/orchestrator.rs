mod common;

use common::{Harness, RecordingGateway};
use tlumacz::config::TranslateConfig;
use tlumacz::orchestrator::State;
use tlumacz::translate::DetectionResult;
use tlumacz::{OrchestratorError, SENTINEL_DETECTION_UNAVAILABLE};

#[tokio::test]
async fn polish_text_is_translated_to_english() {
    let mut h = Harness::new(RecordingGateway::detecting("pl", 0.98));

    let outcome = h.orchestrator.translate("Witaj świecie").await.unwrap();

    assert_eq!(outcome.target_language, "en");
    assert_eq!(
        h.gateway.translate_calls(),
        vec![("Witaj świecie".to_string(), "en".to_string())]
    );
    assert_eq!(h.orchestrator.last_outcome(), Some(&outcome));
}

#[tokio::test]
async fn french_text_is_translated_to_polish() {
    let mut h = Harness::new(RecordingGateway::detecting("fr", 0.9));

    let outcome = h.orchestrator.translate("Bonjour le monde").await.unwrap();

    assert_eq!(outcome.target_language, "pl");
}

#[tokio::test]
async fn english_text_is_translated_to_polish() {
    let mut h = Harness::new(RecordingGateway::detecting("en", 0.99));

    let outcome = h.orchestrator.translate("Hello world").await.unwrap();

    assert_eq!(outcome.target_language, "pl");
}

#[test]
fn select_target_applies_binary_rule() {
    let h = Harness::new(RecordingGateway::default());

    let pl = DetectionResult::new("pl", 0.98);
    let fr = DetectionResult::new("fr", 0.9);
    let upper = DetectionResult::new("PL", 0.5);

    assert_eq!(h.orchestrator.select_target(&pl), "en");
    assert_eq!(h.orchestrator.select_target(&fr), "pl");
    assert_eq!(h.orchestrator.select_target(&upper), "en");
}

#[test]
fn configured_pair_replaces_defaults() {
    let h = Harness::new(RecordingGateway::default());
    let config = TranslateConfig {
        source_language: "DE".to_string(),
        target_language: "it".to_string(),
    };
    let orchestrator = h.orchestrator.with_languages(&config);

    assert_eq!(orchestrator.source_language(), "de");
    assert_eq!(orchestrator.target_language(), "it");
    assert_eq!(orchestrator.select_target(&DetectionResult::new("de", 1.0)), "it");
    assert_eq!(orchestrator.select_target(&DetectionResult::new("en", 1.0)), "de");
}

#[tokio::test]
async fn detection_failure_returns_sentinel_without_translating() {
    let mut h = Harness::new(RecordingGateway::failing_detection());

    let err = h.orchestrator.translate("Witaj").await.unwrap_err();

    assert!(matches!(err, OrchestratorError::DetectionUnavailable));
    assert_eq!(err.to_string(), SENTINEL_DETECTION_UNAVAILABLE);
    assert!(h.gateway.translate_calls().is_empty());
    assert_eq!(h.orchestrator.state(), State::Idle);

    let log = h.error_log_contents().expect("error.log written");
    assert!(log.contains("language detection failed"));
    assert!(log.contains("no credentials"));
    assert!(h.output.contents().contains("Error during language detection"));
}

#[tokio::test]
async fn translation_failure_is_returned_as_error() {
    let mut h = Harness::new(RecordingGateway::failing_translation("pl"));

    let err = h.orchestrator.translate("Witaj").await.unwrap_err();

    match err {
        OrchestratorError::Translation(e) => assert!(e.to_string().contains("translation failed")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(h.orchestrator.state(), State::Detected);
    assert!(h.orchestrator.last_outcome().is_none());
}

#[tokio::test]
async fn detect_reports_and_stores_result() {
    let mut h = Harness::new(RecordingGateway::detecting("pl", 0.98));
    assert_eq!(h.orchestrator.state(), State::Idle);

    let detection = h.orchestrator.detect("Witaj świecie").await.unwrap();

    assert_eq!(detection.language, "pl");
    assert_eq!(h.orchestrator.state(), State::Detected);
    assert_eq!(h.orchestrator.last_detection(), Some(&detection));
    assert!(h.output.contents().contains("Detected language: pl (confidence 98.0%)"));
    assert!(h.gateway.translate_calls().is_empty());
}
