use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tlumacz::app;
use tlumacz::cli;
use tlumacz::error_log::ErrorLog;
use tlumacz::presenter::Presenter;
use tlumacz::translate::GatewayFactory;
use tlumacz::{Config, Orchestrator};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let presenter = Arc::new(Presenter::stdout());

    let args = match cli::parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => return Ok(ExitCode::from(app::report_parse_error(&presenter, &e).code())),
    };

    let config = Config::discover(args.config_path.as_deref())?;

    // Console output belongs to the presenter; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Language pair: {} <-> {}",
        config.translate.source_language, config.translate.target_language
    );

    let error_log = ErrorLog::new(config.error_log_path());
    let gateway = GatewayFactory::create_gateway(&config.gateway)?;
    let mut orchestrator = Orchestrator::new(gateway, presenter.clone(), error_log.clone())
        .with_languages(&config.translate);

    let exit = app::run(&args, &mut orchestrator, &presenter, &error_log).await;
    Ok(ExitCode::from(exit.code()))
}
