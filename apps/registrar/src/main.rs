//! # Registrar
//!
//! Student records kept through server-rendered HTML forms.
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server (the default command)
//! registrar server --host 0.0.0.0 --port 8080
//!
//! # Inspect storage
//! registrar list --json-mode
//! registrar majors
//! registrar init --database students.db
//! ```

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // REGISTRAR_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("REGISTRAR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "registrar=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!(
        r#"
  Registrar v{}
  Student records
"#,
        env!("CARGO_PKG_VERSION")
    );
}
