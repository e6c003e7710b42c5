//! CLI-specific error types
//!
//! Every CLI error is fatal; main prints it and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config file {0} already exists, refusing to overwrite")]
    ConfigExists(PathBuf),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
