//! CLI argument definitions using clap
//!
//! Commands:
//! - comicshelf init --config <path>
//! - comicshelf serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// comicshelf - a comic book inventory service
#[derive(Parser, Debug)]
#[command(name = "comicshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a starter configuration file
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./comicshelf.json")]
        config: PathBuf,
    },

    /// Start the inventory HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./comicshelf.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
