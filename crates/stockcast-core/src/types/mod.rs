//! # Core Type Definitions
//!
//! This module contains the core types shared by every StockCast computation:
//! - The product record read from the inventory table (`ProductRecord`)
//! - The derived stock status (`Status`)
//! - Error types (`StockError`)
//!
//! ## Determinism Guarantees
//!
//! - Stock and capacity are integers; status derivation never touches floats
//! - `Status` implements `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PRODUCT RECORD
// =============================================================================

/// One row of the inventory table.
///
/// Values are kept exactly as read. Range checks happen in
/// [`crate::status::classify`], never at construction, so a caller can always
/// see the offending record in an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier. Not required to be unique.
    #[serde(alias = "Product_Name")]
    pub product_name: String,
    /// Current on-hand quantity. Valid values are `>= 0`.
    #[serde(alias = "Stock_Level")]
    pub stock_level: i64,
    /// Maximum storage capacity. Valid values are `> 0`.
    #[serde(alias = "Max_Capacity")]
    pub max_capacity: i64,
}

impl ProductRecord {
    /// Create a new product record.
    #[must_use]
    pub fn new(product_name: impl Into<String>, stock_level: i64, max_capacity: i64) -> Self {
        Self {
            product_name: product_name.into(),
            stock_level,
            max_capacity,
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Stock status of a single product. Exactly one applies to every valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing on hand.
    OutOfStock,
    /// Below 20% of capacity.
    LowStock,
    /// Above 20% of capacity but not yet full.
    Arriving,
    /// At or above capacity, or exactly on the 20% boundary.
    InStock,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 4] = [
        Status::OutOfStock,
        Status::LowStock,
        Status::Arriving,
        Status::InStock,
    ];

    /// Machine name, identical to the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::OutOfStock => "out_of_stock",
            Status::LowStock => "low_stock",
            Status::Arriving => "arriving",
            Status::InStock => "in_stock",
        }
    }

    /// Human-readable label used on charts.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Status::OutOfStock => "Out of Stock",
            Status::LowStock => "Low Stock",
            Status::Arriving => "Arriving Stock",
            Status::InStock => "In Stock",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the StockCast system.
///
/// - No silent failures: invalid records are reported, never dropped
/// - `InvalidRecord` (value out of range) is distinct from `MalformedRecord`
///   (value could not be parsed)
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// A record parsed correctly but a field is outside its valid range.
    #[error(
        "Invalid record{pos} ({product:?}): {field} {reason}",
        pos = record_position(.position)
    )]
    InvalidRecord {
        /// 1-based position in the batch, when known.
        position: Option<usize>,
        product: String,
        field: &'static str,
        reason: String,
    },

    /// A field could not be parsed.
    #[error("Malformed record at line {line}: {field} value {value:?} is not a valid {expected}")]
    MalformedRecord {
        /// 1-based line number in the source file.
        line: u64,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The header row lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// An expiry date is not in `YYYY-MM-DD` form.
    #[error("Invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A caller-supplied parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An input exceeded a size limit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// A serialization or parse error not tied to a single field.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl StockError {
    /// Attach a batch position to an `InvalidRecord`. Other variants pass through.
    #[must_use]
    pub fn at_position(self, at: usize) -> Self {
        match self {
            StockError::InvalidRecord {
                product,
                field,
                reason,
                ..
            } => StockError::InvalidRecord {
                position: Some(at),
                product,
                field,
                reason,
            },
            other => other,
        }
    }

    /// True for errors that describe a single bad record.
    #[must_use]
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            StockError::InvalidRecord { .. }
                | StockError::MalformedRecord { .. }
                | StockError::InvalidDate { .. }
        )
    }
}

fn record_position(position: &Option<usize>) -> String {
    match position {
        Some(at) => format!(" #{at}"),
        None => String::new(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_matches_machine_name() {
        assert_eq!(Status::OutOfStock.to_string(), "out_of_stock");
        assert_eq!(Status::LowStock.to_string(), "low_stock");
        assert_eq!(Status::Arriving.to_string(), "arriving");
        assert_eq!(Status::InStock.to_string(), "in_stock");
    }

    #[test]
    fn status_ordering_is_display_order() {
        let mut shuffled = vec![
            Status::InStock,
            Status::OutOfStock,
            Status::Arriving,
            Status::LowStock,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Status::ALL.to_vec());
    }

    #[test]
    fn invalid_record_message_names_record_and_field() {
        let err = StockError::InvalidRecord {
            position: None,
            product: "Insulin".to_string(),
            field: "Max_Capacity",
            reason: "must be positive (got 0)".to_string(),
        }
        .at_position(3);

        assert_eq!(
            err.to_string(),
            "Invalid record #3 (\"Insulin\"): Max_Capacity must be positive (got 0)"
        );
    }

    #[test]
    fn invalid_record_message_without_position() {
        let err = StockError::InvalidRecord {
            position: None,
            product: "Syringe".to_string(),
            field: "Stock_Level",
            reason: "must not be negative (got -1)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record (\"Syringe\"): Stock_Level must not be negative (got -1)"
        );
    }

    #[test]
    fn at_position_ignores_other_variants() {
        let err = StockError::MissingColumn("Stock_Level".to_string()).at_position(7);
        assert_eq!(err, StockError::MissingColumn("Stock_Level".to_string()));
    }

    #[test]
    fn record_errors_are_classified() {
        let malformed = StockError::MalformedRecord {
            line: 2,
            field: "Stock_Level",
            value: "ten".to_string(),
            expected: "integer",
        };
        assert!(malformed.is_record_error());
        assert!(!StockError::IoError("boom".to_string()).is_record_error());
    }
}
