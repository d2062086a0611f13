//! # stockcast-core
//!
//! The deterministic inventory engine for StockCast - THE LOGIC.
//!
//! This crate turns a table of products into the numbers a stock dashboard
//! shows: one status per product, counts per status, and the weighted
//! percentages behind the pie and pyramid charts. It also carries the smaller
//! page-level computations (expiry and compliance checks, emergency buffer
//! distribution, financial summary).
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Holds no state between calls; every operation returns a fresh value
//! - Never skips or repairs invalid input; the caller decides
//! - Has NO async, NO network dependencies (pure Rust)
//! - Does not log; the app layer owns tracing

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod buffer;
pub mod comparison;
pub mod expiry;
pub mod finance;
pub mod loader;
pub mod primitives;
pub mod status;
pub mod types;

mod table;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{ProductRecord, Status, StockError};

// =============================================================================
// RE-EXPORTS: Status Pipeline
// =============================================================================

pub use aggregate::{
    ChartSlice, PyramidSegment, StockSummary, TRACKED_STATUSES, aggregate, weighted_percentage,
};
pub use comparison::{ComparisonPoint, PredictedStockLevel, compare};
pub use loader::{load_inventory, load_inventory_file, summarize_file};
pub use status::{Screening, classify, classify_batch, screen};

// =============================================================================
// RE-EXPORTS: Page Computations
// =============================================================================

pub use buffer::{BufferDistribution, BufferShare, DemandRow, buffer_distribution, load_demand};
pub use expiry::{
    Compliance, ComplianceReport, ExpiredProduct, ExpiryEntry, check_compliance, find_entry,
    find_expired, load_expiry, parse_expiry_date,
};
pub use finance::{
    ExpenseLine, FinancialSummary, SalesLine, format_amount, load_expenses, load_sales,
    top_by_revenue,
};
