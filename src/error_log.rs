use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

/// Error report file, overwritten on every recorded failure
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the log contents with a report of `err` and its causes.
    pub fn record(&self, operation: &str, err: &(dyn std::error::Error + 'static)) -> Result<()> {
        let mut report = format!(
            "[{}] {} failed\nerror: {}\n",
            Utc::now().to_rfc3339(),
            operation,
            err
        );

        let mut source = err.source();
        while let Some(cause) = source {
            report.push_str(&format!("  caused by: {}\n", cause));
            source = cause.source();
        }
        report.push_str(&format!("\n{:#?}\n", err));

        fs::write(&self.path, report)
            .with_context(|| format!("Failed to write error log: {}", self.path.display()))?;
        debug!("Wrote error report to {}", self.path.display());
        Ok(())
    }
}
