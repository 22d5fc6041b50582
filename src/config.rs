use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

/// Names probed in the working directory and next to the executable.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["tlumacz.yaml", "tlumacz.json"];

/// Environment variable pointing at an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "TLUMACZ_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Language pair used by the orchestrator's switching rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_error_log")]
    pub error_log: String,
}

fn default_source_language() -> String {
    "pl".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_base_url() -> String {
    "https://translation.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_filter() -> String {
    "tlumacz=warn".to_string()
}

fn default_error_log() -> String {
    "error.log".to_string()
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: None,
            project_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            error_log: default_error_log(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        let content = substitute_env_vars(&content);

        // Determine file type by extension
        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON configuration: {}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML configuration: {}", path))?
        };

        config.gateway.api_key = config.gateway.api_key.filter(|key| is_resolved(key));
        config.gateway.project_id = config.gateway.project_id.filter(|id| is_resolved(id));
        Ok(config)
    }

    /// Load the first configuration found, or fall back to built-in defaults.
    ///
    /// Probed locations are optional, but any file that exists must load,
    /// the same as an explicitly requested one (flag or environment).
    pub fn discover(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(&path);
        }
        Self::discover_in(&candidate_paths())
    }

    /// Load the first existing file among `candidates`, or the defaults if none exists.
    pub fn discover_in(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            if !path.is_file() {
                continue;
            }
            let path = path.to_string_lossy().to_string();
            let config = Self::load(&path)?;
            debug!("Loaded configuration from: {}", path);
            return Ok(config);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn error_log_path(&self) -> PathBuf {
        PathBuf::from(&self.logging.error_log)
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));

    let mut paths: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(PathBuf::from).collect();
    if let Some(dir) = exe_dir {
        paths.extend(CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)));
    }
    paths
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables stay literal.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(pattern) => pattern,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

fn is_resolved(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains("${")
}
