//! # Primitives
//!
//! Hardcoded runtime constants for the StockCast CORE.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// The low-stock threshold is one fifth (20%) of a product's capacity.
///
/// Classification compares `stock * LOW_STOCK_DIVISOR` against capacity so
/// the boundary is exact and no floating-point rounding is involved.
pub const LOW_STOCK_DIVISOR: i128 = 5;

/// Default inventory file read by the dashboard.
pub const DEFAULT_INVENTORY_FILE: &str = "daily.csv";

// =============================================================================
// PREDICTED STOCK LEVEL
// =============================================================================

/// Lowest accepted predicted stock level.
pub const PREDICTED_STOCK_MIN: i64 = 0;

/// Highest accepted predicted stock level.
pub const PREDICTED_STOCK_MAX: i64 = 200;

/// Predicted stock level used when none is supplied.
pub const DEFAULT_PREDICTED_STOCK: u8 = 70;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of records in a single batch or file.
///
/// Larger inputs are rejected with `StockError::LimitExceeded`.
pub const MAX_RECORDS: usize = 100_000;

/// Maximum length of a product name, in bytes.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 256;

/// Maximum size of an input file (50 MB).
///
/// Checked against file metadata before any bytes are read.
pub const MAX_INPUT_FILE_SIZE: u64 = 50 * 1024 * 1024;

// =============================================================================
// EXPIRY & COMPLIANCE
// =============================================================================

/// Date format for expiry dates.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage requirements that count as temperature-compliant.
pub const COMPLIANT_TEMPERATURES: [&str; 2] = ["Room Temperature", "Cool Storage"];
