use pricing_server::config::{DEFAULT_LOG_DIR, LOG_DIR_VAR, ServerConfig, load_dotenv};
use pricing_server::error::ServerError;
use pricing_server::logger::initialize as LoggerInitialize;
use pricing_server::{AppState, serve};

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_path = load_dotenv();

    let log_dir = std::env::var(LOG_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));
    if let Err(e) = LoggerInitialize(&log_dir) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(dotenv_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(dotenv_path: Option<PathBuf>) -> Result<(), ServerError> {
    info!("Card pricing server starting");
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = ServerConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| ServerError::server(format!("Failed to bind {bind_addr}: {e}")))?;

    serve(listener, state).await
}
