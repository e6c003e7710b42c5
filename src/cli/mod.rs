//! CLI module for comicshelf
//!
//! Provides the command-line interface:
//! - init: write a starter configuration file
//! - serve: run the inventory HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliResult};
