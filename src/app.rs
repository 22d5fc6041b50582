use tracing::{error, warn};

use crate::cli::{self, ParsedArgs};
use crate::error_log::ErrorLog;
use crate::orchestrator::{Orchestrator, OrchestratorError};
use crate::presenter::Presenter;

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
    Usage,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
            Exit::Usage => 2,
        }
    }
}

/// Report a command line that could not be parsed
pub fn report_parse_error(presenter: &Presenter, err: &clap::Error) -> Exit {
    presenter.alert(err.to_string().trim_end());
    presenter.plain(&cli::usage());
    Exit::Usage
}

/// Drive one invocation: help, version, detection only, or detect and translate.
pub async fn run(
    args: &ParsedArgs,
    orchestrator: &mut Orchestrator,
    presenter: &Presenter,
    error_log: &ErrorLog,
) -> Exit {
    if args.show_help {
        presenter.plain(&cli::usage());
        return Exit::Success;
    }
    if args.show_version {
        presenter.plain(&cli::version_banner());
        return Exit::Success;
    }
    if args.text.is_none() {
        presenter.plain(&cli::usage());
        return Exit::Success;
    }

    let text = match args.text.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            presenter.alert("Error: no text to translate was given.");
            presenter.plain(&cli::usage());
            return Exit::Usage;
        }
    };

    for (flag, code) in [("--source", &args.source_language), ("--target", &args.target_language)] {
        if code.as_deref().is_some_and(|c| c.trim().is_empty()) {
            presenter.alert(&format!("Error: {} needs a language code.", flag));
            presenter.plain(&cli::usage());
            return Exit::Usage;
        }
    }
    if let Some(code) = &args.source_language {
        orchestrator.set_source_language(code);
    }
    if let Some(code) = &args.target_language {
        orchestrator.set_target_language(code);
    }

    if args.detect_only {
        // the orchestrator prints the detection itself
        return match orchestrator.detect(text).await {
            Ok(_) => Exit::Success,
            Err(_) => Exit::Failure,
        };
    }

    match orchestrator.translate(text).await {
        Ok(outcome) => {
            presenter.success(&outcome.translated_text);
            Exit::Success
        }
        Err(OrchestratorError::DetectionUnavailable) => {
            presenter.alert(&OrchestratorError::DetectionUnavailable.to_string());
            Exit::Failure
        }
        Err(OrchestratorError::Translation(e)) => {
            error!("Translation failed: {}", e);
            if let Err(log_err) = error_log.record("translation", &e) {
                warn!("{:#}", log_err);
            }
            presenter.alert(&format!("Error during translation: {}", e.remote()));
            Exit::Failure
        }
    }
}
