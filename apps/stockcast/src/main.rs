//! # StockCast - Inventory Status Dashboard
//!
//! The main binary for the StockCast stock-status engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for inventory reports
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    apps/stockcast (THE BINARY)                  │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐   │
//! │  │   CLI       │    │   HTTP API  │    │  Configuration   │   │
//! │  │  (clap)     │    │   (axum)    │    │  (toml + env)    │   │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘   │
//! │         │                  │                    │              │
//! │         └──────────────────┼────────────────────┘              │
//! │                            ▼                                   │
//! │                   ┌─────────────────┐                          │
//! │                   │ stockcast-core  │                          │
//! │                   │  (THE LOGIC)    │                          │
//! │                   └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! stockcast server --host 0.0.0.0 --port 8080
//!
//! # CLI reports
//! stockcast summary -i daily.csv
//! stockcast compare --predicted 90
//! stockcast expired --file expiry.csv
//! ```

use clap::Parser;
use stockcast::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // STOCKCAST_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("STOCKCAST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stockcast=info,tower_http=debug".into());

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

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the StockCast startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗████████╗ ██████╗  ██████╗██╗  ██╗ ██████╗ █████╗ ███████╗████████╗
  ██╔════╝╚══██╔══╝██╔═══██╗██╔════╝██║ ██╔╝██╔════╝██╔══██╗██╔════╝╚══██╔══╝
  ███████╗   ██║   ██║   ██║██║     █████╔╝ ██║     ███████║███████╗   ██║
  ╚════██║   ██║   ██║   ██║██║     ██╔═██╗ ██║     ██╔══██║╚════██║   ██║
  ███████║   ██║   ╚██████╔╝╚██████╗██║  ██╗╚██████╗██║  ██║███████║   ██║
  ╚══════╝   ╚═╝    ╚═════╝  ╚═════╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝╚══════╝   ╚═╝

  Inventory Status Dashboard v{}

  Classify • Aggregate • Compare
"#,
        env!("CARGO_PKG_VERSION")
    );
}
