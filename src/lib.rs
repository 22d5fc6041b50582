pub mod app;
pub mod cli;
pub mod config;
pub mod error_log;
pub mod orchestrator;
pub mod presenter;
pub mod translate;

pub use app::Exit;
pub use config::Config;
pub use orchestrator::{Orchestrator, OrchestratorError, SENTINEL_DETECTION_UNAVAILABLE};
