//! # Status Module
//!
//! Record validation and stock-status classification.
//!
//! - Validate records before classification
//! - Reject out-of-range input, never coerce it
//! - Classify with exact integer comparisons

use crate::primitives::{LOW_STOCK_DIVISOR, MAX_PRODUCT_NAME_LENGTH, MAX_RECORDS};
use crate::{ProductRecord, Status, StockError};

/// Reject batches larger than [`MAX_RECORDS`].
pub(crate) fn check_batch_size(len: usize) -> Result<(), StockError> {
    if len > MAX_RECORDS {
        return Err(StockError::LimitExceeded(format!(
            "Record count {} exceeds maximum {}",
            len, MAX_RECORDS
        )));
    }
    Ok(())
}

/// Validate a product record.
///
/// A record is valid if:
/// - The product name is within length limits
/// - `stock_level` is not negative
/// - `max_capacity` is positive
///
/// Returns `StockError::InvalidRecord` naming the failing field otherwise.
pub fn validate(record: &ProductRecord) -> Result<(), StockError> {
    let invalid = |field: &'static str, reason: String| StockError::InvalidRecord {
        position: None,
        product: record.product_name.clone(),
        field,
        reason,
    };

    if record.product_name.len() > MAX_PRODUCT_NAME_LENGTH {
        return Err(invalid(
            "Product_Name",
            format!("exceeds {} bytes", MAX_PRODUCT_NAME_LENGTH),
        ));
    }

    if record.max_capacity <= 0 {
        return Err(invalid(
            "Max_Capacity",
            format!("must be positive (got {})", record.max_capacity),
        ));
    }

    if record.stock_level < 0 {
        return Err(invalid(
            "Stock_Level",
            format!("must not be negative (got {})", record.stock_level),
        ));
    }

    Ok(())
}

/// Classify a product into exactly one [`Status`].
///
/// | Status | Condition |
/// |---|---|
/// | `OutOfStock` | `stock == 0` |
/// | `LowStock` | `stock < capacity / 5` |
/// | `Arriving` | `capacity / 5 < stock < capacity` |
/// | `InStock` | otherwise |
///
/// A stock level sitting exactly on the 20% boundary matches neither
/// `LowStock` nor `Arriving` and is reported as `InStock`.
pub fn classify(record: &ProductRecord) -> Result<Status, StockError> {
    validate(record)?;

    let stock = i128::from(record.stock_level);
    let capacity = i128::from(record.max_capacity);
    let scaled = stock * LOW_STOCK_DIVISOR;

    let status = if stock == 0 {
        Status::OutOfStock
    } else if scaled < capacity {
        Status::LowStock
    } else if scaled > capacity && stock < capacity {
        Status::Arriving
    } else {
        Status::InStock
    };

    Ok(status)
}

/// Classify a batch in order, stopping at the first invalid record.
///
/// The error carries the record's 1-based position.
pub fn classify_batch(records: &[ProductRecord]) -> Result<Vec<Status>, StockError> {
    check_batch_size(records.len())?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| classify(record).map_err(|e| e.at_position(index + 1)))
        .collect()
}

// =============================================================================
// SCREENING
// =============================================================================

/// Result of [`screen`]: the batch split into usable records and rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screening {
    /// Records that passed validation, in input order.
    pub valid: Vec<ProductRecord>,
    /// One error per rejected record, with its 1-based batch position.
    pub rejected: Vec<StockError>,
}

impl Screening {
    /// True when every record passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Split a batch into valid records and per-record errors.
///
/// Nothing is repaired; a caller that wants to aggregate only the good rows
/// passes `screening.valid` to [`crate::aggregate`] explicitly. Only an
/// oversized batch fails as a whole.
pub fn screen(records: &[ProductRecord]) -> Result<Screening, StockError> {
    check_batch_size(records.len())?;

    let mut screening = Screening::default();

    for (index, record) in records.iter().enumerate() {
        match validate(record) {
            Ok(()) => screening.valid.push(record.clone()),
            Err(e) => screening.rejected.push(e.at_position(index + 1)),
        }
    }

    Ok(screening)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(stock: i64, capacity: i64) -> ProductRecord {
        ProductRecord::new("Aspirin", stock, capacity)
    }

    #[test]
    fn zero_stock_is_out_of_stock() {
        assert_eq!(classify(&record(0, 100)).expect("classify"), Status::OutOfStock);
        assert_eq!(classify(&record(0, 1)).expect("classify"), Status::OutOfStock);
    }

    #[test]
    fn below_twenty_percent_is_low_stock() {
        assert_eq!(classify(&record(15, 100)).expect("classify"), Status::LowStock);
        assert_eq!(classify(&record(19, 100)).expect("classify"), Status::LowStock);
    }

    #[test]
    fn between_boundary_and_capacity_is_arriving() {
        assert_eq!(classify(&record(21, 100)).expect("classify"), Status::Arriving);
        assert_eq!(classify(&record(99, 100)).expect("classify"), Status::Arriving);
    }

    #[test]
    fn at_or_above_capacity_is_in_stock() {
        assert_eq!(classify(&record(100, 100)).expect("classify"), Status::InStock);
        assert_eq!(classify(&record(250, 100)).expect("classify"), Status::InStock);
    }

    #[test]
    fn exact_twenty_percent_boundary_is_in_stock() {
        assert_eq!(classify(&record(20, 100)).expect("classify"), Status::InStock);
        assert_eq!(classify(&record(1, 5)).expect("classify"), Status::InStock);
    }

    #[test]
    fn boundary_is_exact_for_non_multiples() {
        // 20% of 7 is 1.4: 1 is low, 2 is arriving
        assert_eq!(classify(&record(1, 7)).expect("classify"), Status::LowStock);
        assert_eq!(classify(&record(2, 7)).expect("classify"), Status::Arriving);
    }

    #[test]
    fn small_capacity_has_no_arriving_band() {
        // capacity 1: any positive stock is at capacity
        assert_eq!(classify(&record(1, 1)).expect("classify"), Status::InStock);
        // capacity 4: 20% is 0.8, so 1..=3 are arriving
        assert_eq!(classify(&record(1, 4)).expect("classify"), Status::Arriving);
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(
            classify(&record(i64::MAX, i64::MAX)).expect("classify"),
            Status::InStock
        );
        assert_eq!(
            classify(&record(i64::MAX / 4, i64::MAX)).expect("classify"),
            Status::Arriving
        );
    }

    #[test]
    fn batch_classification_keeps_order() {
        let statuses =
            classify_batch(&[record(0, 10), record(5, 10), record(10, 10)]).expect("batch");
        assert_eq!(statuses, vec![Status::OutOfStock, Status::Arriving, Status::InStock]);
    }

    #[test]
    fn batch_classification_names_first_bad_position() {
        let err = classify_batch(&[record(1, 10), record(1, 0), record(-1, 10)]).expect_err("bad");
        assert!(matches!(
            err,
            StockError::InvalidRecord { position: Some(2), field: "Max_Capacity", .. }
        ));
    }

    #[test]
    fn zero_capacity_is_invalid_record() {
        let err = classify(&record(10, 0)).expect_err("zero capacity");
        assert!(matches!(
            err,
            StockError::InvalidRecord { field: "Max_Capacity", ref product, position: None, .. }
                if product == "Aspirin"
        ));
    }

    #[test]
    fn negative_capacity_is_invalid_record() {
        assert!(matches!(
            classify(&record(10, -5)),
            Err(StockError::InvalidRecord { field: "Max_Capacity", .. })
        ));
    }

    #[test]
    fn negative_stock_is_invalid_record() {
        assert!(matches!(
            classify(&record(-1, 100)),
            Err(StockError::InvalidRecord { field: "Stock_Level", .. })
        ));
    }

    #[test]
    fn overlong_name_is_invalid_record() {
        let long = ProductRecord::new("x".repeat(MAX_PRODUCT_NAME_LENGTH + 1), 1, 10);
        assert!(matches!(
            classify(&long),
            Err(StockError::InvalidRecord { field: "Product_Name", .. })
        ));
    }

    #[test]
    fn screen_partitions_without_coercion() {
        let records = vec![record(0, 100), record(10, 0), record(50, 100), record(-3, 10)];
        let screening = screen(&records).expect("screen");

        assert_eq!(screening.valid, vec![record(0, 100), record(50, 100)]);
        assert_eq!(screening.rejected.len(), 2);
        assert!(!screening.is_clean());
        assert!(matches!(
            screening.rejected[0],
            StockError::InvalidRecord { position: Some(2), .. }
        ));
        assert!(matches!(
            screening.rejected[1],
            StockError::InvalidRecord { position: Some(4), .. }
        ));
    }

    #[test]
    fn batches_over_record_limit_are_refused() {
        let full = vec![record(1, 10); MAX_RECORDS];
        assert_eq!(classify_batch(&full).expect("at limit").len(), MAX_RECORDS);

        let over = vec![record(1, 10); MAX_RECORDS + 1];
        assert!(matches!(classify_batch(&over), Err(StockError::LimitExceeded(_))));
        assert!(matches!(screen(&over), Err(StockError::LimitExceeded(_))));
    }

    #[test]
    fn screen_empty_is_clean() {
        let screening = screen(&[]).expect("screen");
        assert!(screening.is_clean());
        assert!(screening.valid.is_empty());
    }
}
