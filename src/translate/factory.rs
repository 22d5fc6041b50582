use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use crate::config::GatewayConfig;
use super::client::GoogleTranslateClient;
use super::interface::TranslateGateway;

/// Factory for creating translation gateways
pub struct GatewayFactory;

impl GatewayFactory {
    /// Create a gateway based on configuration
    ///
    /// # Arguments
    /// * `config` - Gateway section of the configuration
    ///
    /// # Returns
    /// Shared TranslateGateway implementation
    pub fn create_gateway(config: &GatewayConfig) -> Result<Arc<dyn TranslateGateway>> {
        info!("Initializing translation gateway: {}", config.provider);

        match config.provider.as_str() {
            "google" | "google_v2" => Ok(Arc::new(GoogleTranslateClient::new(config))),
            _ => Err(anyhow::anyhow!(
                "Unsupported translation provider: {}",
                config.provider
            )),
        }
    }
}
