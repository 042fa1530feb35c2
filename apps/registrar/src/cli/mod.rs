//! # Registrar CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server (default)
//! - `list` - Print stored students
//! - `majors` - Print the accepted majors
//! - `init` - Create an empty database

mod commands;

use clap::{Parser, Subcommand};
use registrar::config::{Backend, Config, ConfigError};
use registrar_core::RegistrarError;
use std::path::PathBuf;
use thiserror::Error;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Registrar - student records over server-rendered HTML forms.
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the student database (overrides `storage.database`)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend (overrides `storage.backend`)
    #[arg(short = 'B', long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Configuration file (default: ./registrar.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides `server.host`)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides `server.port`)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print every stored student
    List,

    /// Print the accepted majors
    Majors,

    /// Initialize a new empty database
    Init {
        /// Replace an existing database file
        #[arg(short, long)]
        force: bool,
    },
}

/// Errors surfaced to `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registrar(#[from] RegistrarError),

    #[error("{0}")]
    Usage(String),
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Load the config file and layer global flags over it.
pub fn resolve_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(database) = &cli.database {
        config.storage.database = database.clone();
    }
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CliError> {
    let mut config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::List) => cmd_list(&config, json_mode),
        Some(Commands::Majors) => cmd_majors(json_mode),
        Some(Commands::Init { force }) => cmd_init(&config, force),
        None => cmd_server(&config).await,
    }
}

// =============================================================================
// TESTS
// =============================================================================
