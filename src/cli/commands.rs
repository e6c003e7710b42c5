//! CLI command implementations
//!
//! `init` writes a starter config; `serve` loads the config, opens the
//! configured store, and runs the HTTP server until shutdown.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::store::{ComicStore, FileStore, MemoryStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "comicshelf=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Write a starter configuration file with the default settings.
///
/// Refuses to overwrite an existing file so a hand-edited config is never
/// clobbered.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::ConfigExists(config_path.to_path_buf()));
    }

    let config = ServiceConfig::default();
    let content = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, content)?;

    println!("wrote default config to {}", config_path.display());

    Ok(())
}

/// Start the inventory HTTP server.
///
/// Loads the config (defaults if the file is absent), applies the port
/// override, opens the configured store, and serves until shutdown.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = ServiceConfig::load_or_default(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    let data_file = config.data_file.clone();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let store: Arc<dyn ComicStore> = match data_file {
            Some(path) => {
                info!(path = %path.display(), "using file-backed store");
                Arc::new(FileStore::open(path).await?)
            }
            None => {
                info!("using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        HttpServer::new(config, store).start().await?;
        Ok(())
    })
}
