use std::sync::Arc;
use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};

use super::interface::{DetectionResult, GatewayError, TranslateGateway, TranslationOutcome};

/// Synchronous front for any [`TranslateGateway`].
///
/// Owns a current-thread runtime; must not be used from inside another
/// tokio runtime.
pub struct BlockingGateway {
    inner: Arc<dyn TranslateGateway>,
    runtime: Runtime,
}

impl BlockingGateway {
    pub fn new(inner: Arc<dyn TranslateGateway>) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build runtime for blocking gateway")?;
        Ok(Self { inner, runtime })
    }

    pub fn detect_language(&self, text: &str) -> Result<DetectionResult, GatewayError> {
        self.runtime.block_on(self.inner.detect_language(text))
    }

    pub fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome, GatewayError> {
        self.runtime.block_on(self.inner.translate(text, target_language))
    }
}
