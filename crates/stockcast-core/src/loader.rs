//! CSV inventory data loader.
//!
//! Parses the inventory table into `ProductRecord`s.
//! Required columns (others are ignored):
//!   Product_Name, Stock_Level, Max_Capacity
//!
//! A missing file is "no data", not an error.

use crate::aggregate::{StockSummary, aggregate};
use crate::table::{open_table_file, read_table};
use crate::{ProductRecord, StockError};
use std::io::Read;
use std::path::Path;

/// Column holding the product identifier.
pub const PRODUCT_NAME_COLUMN: &str = "Product_Name";
/// Column holding the on-hand quantity.
pub const STOCK_LEVEL_COLUMN: &str = "Stock_Level";
/// Column holding the storage capacity.
pub const MAX_CAPACITY_COLUMN: &str = "Max_Capacity";

/// Load product records from a CSV reader.
///
/// Non-integer `Stock_Level` or `Max_Capacity` cells fail with
/// `StockError::MalformedRecord` naming the line and column. Range checks
/// are left to classification.
pub fn load_inventory<R: Read>(reader: R) -> Result<Vec<ProductRecord>, StockError> {
    read_table(
        reader,
        &[PRODUCT_NAME_COLUMN, STOCK_LEVEL_COLUMN, MAX_CAPACITY_COLUMN],
        |row| {
            Ok(ProductRecord {
                product_name: row.text(PRODUCT_NAME_COLUMN).to_string(),
                stock_level: row.integer(STOCK_LEVEL_COLUMN)?,
                max_capacity: row.integer(MAX_CAPACITY_COLUMN)?,
            })
        },
    )
}

/// Load product records from a CSV file path.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_inventory_file(path: &Path) -> Result<Option<Vec<ProductRecord>>, StockError> {
    match open_table_file(path)? {
        Some(file) => load_inventory(file).map(Some),
        None => Ok(None),
    }
}

/// Load and aggregate an inventory file in one step.
///
/// A missing file yields [`StockSummary::empty`].
pub fn summarize_file(path: &Path) -> Result<StockSummary, StockError> {
    match load_inventory_file(path)? {
        Some(records) => aggregate(&records),
        None => Ok(StockSummary::empty()),
    }
}
