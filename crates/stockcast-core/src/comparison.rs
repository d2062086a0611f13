//! # Predicted vs Actual
//!
//! Pairs each record's stock level with a user-supplied predicted level.
//!
//! The predicted level feeds the comparison chart only. Classification and
//! aggregation never read it.

use crate::primitives::{DEFAULT_PREDICTED_STOCK, PREDICTED_STOCK_MAX, PREDICTED_STOCK_MIN};
use crate::{ProductRecord, StockError};
use serde::{Deserialize, Serialize};

/// A predicted stock level, bounded to `0..=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PredictedStockLevel(u8);

impl PredictedStockLevel {
    /// Create a predicted level, rejecting values outside `0..=200`.
    pub fn new(value: i64) -> Result<Self, StockError> {
        if !(PREDICTED_STOCK_MIN..=PREDICTED_STOCK_MAX).contains(&value) {
            return Err(StockError::InvalidParameter(format!(
                "predicted stock level {} outside {}..={}",
                value, PREDICTED_STOCK_MIN, PREDICTED_STOCK_MAX
            )));
        }
        // In range, so it fits in a u8.
        Ok(Self(value as u8))
    }

    /// Get the raw level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for PredictedStockLevel {
    fn default() -> Self {
        Self(DEFAULT_PREDICTED_STOCK)
    }
}

impl TryFrom<i64> for PredictedStockLevel {
    type Error = StockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PredictedStockLevel> for i64 {
    fn from(level: PredictedStockLevel) -> Self {
        i64::from(level.0)
    }
}

impl std::fmt::Display for PredictedStockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One point of the predicted-vs-actual series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// Position of the record in the table (the chart's x axis).
    pub index: usize,
    pub product_name: String,
    pub actual: i64,
    pub predicted: u8,
}

/// Build the predicted-vs-actual series, one point per record in input order.
#[must_use]
pub fn compare(records: &[ProductRecord], predicted: PredictedStockLevel) -> Vec<ComparisonPoint> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| ComparisonPoint {
            index,
            product_name: record.product_name.clone(),
            actual: record.stock_level,
            predicted: predicted.value(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(PredictedStockLevel::new(0).expect("min").value(), 0);
        assert_eq!(PredictedStockLevel::new(200).expect("max").value(), 200);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            PredictedStockLevel::new(201),
            Err(StockError::InvalidParameter(_))
        ));
        assert!(matches!(
            PredictedStockLevel::new(-1),
            Err(StockError::InvalidParameter(_))
        ));
    }

    #[test]
    fn default_is_seventy() {
        assert_eq!(PredictedStockLevel::default().value(), 70);
    }

    #[test]
    fn series_passes_values_through() {
        let records = vec![
            ProductRecord::new("Gloves", 120, 100),
            ProductRecord::new("Masks", 0, 0),
        ];
        let level = PredictedStockLevel::new(90).expect("level");
        let series = compare(&records, level);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].index, 0);
        assert_eq!(series[0].actual, 120);
        assert_eq!(series[0].predicted, 90);
        // invalid capacity does not matter here
        assert_eq!(series[1].product_name, "Masks");
        assert_eq!(series[1].predicted, 90);
    }
}
