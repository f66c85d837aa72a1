mod cli;

use clap::Parser;
use cli::Cli;
use interview_coach_core::application::template::TemplateError;
use interview_coach_core::server::{self, ServerError};
use interview_coach_core::{AppConfig, ConfigError, build_pipeline};
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid prompt template: {0}")]
    Prompt(#[from] TemplateError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Interview coach stopped");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    info!("Starting interview coach");
    debug!(config = ?cli.config, addr = ?cli.addr, "CLI arguments parsed");

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    match &cli.config {
        Some(path) => info!(path = %path.display(), "Loaded configuration from file"),
        None => info!("Loaded configuration using default path or defaults"),
    }
    if let Some(addr) = cli.addr {
        config.server.bind = addr;
    }

    let pipeline = build_pipeline(&config)?;
    server::serve(pipeline, &config.server).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}
