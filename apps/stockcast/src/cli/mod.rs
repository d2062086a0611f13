//! # StockCast CLI Module
//!
//! This module implements the CLI interface for StockCast.
//!
//! ## Available Commands
//!
//! - `summary` - Stock-status metric tiles (default)
//! - `classify` - Per-product status
//! - `compare` - Actual vs predicted stock series
//! - `expired` - Products past their expiry date
//! - `compliance` - Expiry and storage compliance for one product
//! - `buffer` - Emergency buffer distribution
//! - `finance` - Revenue, expenses and profit
//! - `server` - Start the HTTP server

mod commands;

use crate::config::{ConfigLayer, DEFAULT_CONFIG_FILE, Settings};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockcast_core::{StockError, parse_expiry_date};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// StockCast - Inventory Status Dashboard
///
/// Classifies healthcare inventory into out-of-stock, low-stock, arriving and
/// in-stock bands and reports the weighted breakdown.
#[derive(Parser, Debug)]
#[command(name = "stockcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the inventory CSV (overrides config and environment)
    #[arg(short, long, global = true)]
    pub inventory: Option<PathBuf>,

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
    /// Show stock-status metrics
    Summary,

    /// Show the status of every product
    Classify {
        /// Report invalid rows instead of aborting on the first one
        #[arg(short, long)]
        lenient: bool,
    },

    /// Compare actual stock with a predicted level
    Compare {
        /// Predicted stock level (0-200)
        #[arg(short, long)]
        predicted: Option<i64>,
    },

    /// List expired products
    Expired {
        /// Path to the expiry CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Check expiry and storage compliance for one product
    Compliance {
        /// Path to the expiry CSV
        #[arg(short, long)]
        file: PathBuf,

        /// Product identifier
        #[arg(short = 'p', long)]
        product_id: String,

        /// Restrict the lookup to one category
        #[arg(long)]
        category: Option<String>,

        /// Reference date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        today: Option<String>,
    },

    /// Show emergency buffer stock distribution
    Buffer {
        /// Path to the demand CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the financial summary
    Finance {
        /// Path to the sales CSV
        #[arg(short, long)]
        sales: PathBuf,

        /// Path to the expenses CSV
        #[arg(short, long)]
        expenses: PathBuf,

        /// Number of top products by revenue
        #[arg(short = 'n', long, default_value = "5")]
        top: usize,
    },

    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), StockError> {
    let json_mode = cli.json_mode;
    let verbose = cli.verbose;

    let mut flags = ConfigLayer {
        inventory_path: cli.inventory,
        ..ConfigLayer::default()
    };
    match &cli.command {
        Some(Commands::Compare { predicted }) => flags.predicted_stock_level = *predicted,
        Some(Commands::Server { host, port }) => {
            flags.host.clone_from(host);
            flags.port = *port;
        }
        _ => {}
    }
    let settings = Settings::load(&cli.config, flags)?;

    match cli.command {
        Some(Commands::Summary) | None => cmd_summary(&settings, json_mode, verbose),
        Some(Commands::Classify { lenient }) => cmd_classify(&settings, json_mode, lenient),
        Some(Commands::Compare { .. }) => cmd_compare(&settings, json_mode),
        Some(Commands::Expired { file, today }) => {
            cmd_expired(&file, resolve_today(today.as_deref())?, json_mode)
        }
        Some(Commands::Compliance {
            file,
            product_id,
            category,
            today,
        }) => cmd_compliance(
            &file,
            &product_id,
            category.as_deref(),
            resolve_today(today.as_deref())?,
            json_mode,
        ),
        Some(Commands::Buffer { file }) => cmd_buffer(&file, json_mode),
        Some(Commands::Finance {
            sales,
            expenses,
            top,
        }) => cmd_finance(&sales, &expenses, top, json_mode),
        Some(Commands::Server { .. }) => cmd_server(settings).await,
    }
}

/// The reference date: `--today` if given, else the local calendar date.
fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, StockError> {
    match raw {
        Some(raw) => parse_expiry_date(raw),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
