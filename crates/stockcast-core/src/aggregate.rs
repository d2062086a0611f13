//! # Aggregate Metrics
//!
//! Per-status counts and weighted percentages for a product table.
//!
//! ## Metric Definitions
//!
//! | Metric | Definition |
//! |--------|------------|
//! | `*_count` | Number of records with that status |
//! | `total_count` | Number of records in the batch |
//! | `*_pct` | `count / total * 100`, or 0 for an empty batch |
//!
//! Only `low_stock`, `arriving` and `out_of_stock` carry a percentage; those
//! are the three slices of the dashboard pie and pyramid charts.
//!
//! A summary is a fresh value per call. Nothing is accumulated across calls.

use crate::status::{check_batch_size, classify};
use crate::{ProductRecord, Status, StockError};
use serde::{Deserialize, Serialize};

/// Statuses that carry a weighted percentage, in chart order.
pub const TRACKED_STATUSES: [Status; 3] = [Status::LowStock, Status::Arriving, Status::OutOfStock];

// =============================================================================
// STOCK SUMMARY
// =============================================================================

/// Counts and weighted percentages for one batch of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub out_of_stock_count: usize,
    pub low_stock_count: usize,
    pub arriving_count: usize,
    pub in_stock_count: usize,
    pub total_count: usize,
    pub low_stock_pct: f64,
    pub arriving_pct: f64,
    pub out_of_stock_pct: f64,
}

impl StockSummary {
    /// The summary of "no data": all counts and percentages are zero.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            out_of_stock_count: 0,
            low_stock_count: 0,
            arriving_count: 0,
            in_stock_count: 0,
            total_count: 0,
            low_stock_pct: 0.0,
            arriving_pct: 0.0,
            out_of_stock_pct: 0.0,
        }
    }

    /// Build a summary from per-status counts.
    #[must_use]
    pub fn from_counts(
        out_of_stock: usize,
        low_stock: usize,
        arriving: usize,
        in_stock: usize,
    ) -> Self {
        let total = out_of_stock
            .saturating_add(low_stock)
            .saturating_add(arriving)
            .saturating_add(in_stock);

        Self {
            out_of_stock_count: out_of_stock,
            low_stock_count: low_stock,
            arriving_count: arriving,
            in_stock_count: in_stock,
            total_count: total,
            low_stock_pct: weighted_percentage(low_stock, total),
            arriving_pct: weighted_percentage(arriving, total),
            out_of_stock_pct: weighted_percentage(out_of_stock, total),
        }
    }

    /// Count for a single status.
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::OutOfStock => self.out_of_stock_count,
            Status::LowStock => self.low_stock_count,
            Status::Arriving => self.arriving_count,
            Status::InStock => self.in_stock_count,
        }
    }

    /// Weighted percentage for a tracked status. `None` for `InStock`.
    #[must_use]
    pub fn percentage(&self, status: Status) -> Option<f64> {
        match status {
            Status::OutOfStock => Some(self.out_of_stock_pct),
            Status::LowStock => Some(self.low_stock_pct),
            Status::Arriving => Some(self.arriving_pct),
            Status::InStock => None,
        }
    }

    /// True if the batch had no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Pie-chart slices for the tracked statuses, in chart order.
    #[must_use]
    pub fn slices(&self) -> Vec<ChartSlice> {
        TRACKED_STATUSES
            .iter()
            .map(|&status| ChartSlice {
                status,
                label: status.label().to_string(),
                percentage: self.percentage(status).unwrap_or(0.0),
            })
            .collect()
    }

    /// Stacked pyramid segments for the tracked statuses.
    ///
    /// Each segment starts where the previous one ended.
    #[must_use]
    pub fn pyramid(&self) -> Vec<PyramidSegment> {
        let mut offset = 0usize;
        TRACKED_STATUSES
            .iter()
            .map(|&status| {
                let count = self.count(status);
                let segment = PyramidSegment {
                    status,
                    label: status.label().to_string(),
                    count,
                    offset,
                };
                offset = offset.saturating_add(count);
                segment
            })
            .collect()
    }
}

impl Default for StockSummary {
    fn default() -> Self {
        Self::empty()
    }
}

/// One slice of the weighted-percentage pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub status: Status,
    pub label: String,
    pub percentage: f64,
}

/// One bar of the stacked inventory pyramid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidSegment {
    pub status: Status,
    pub label: String,
    pub count: usize,
    /// Sum of the counts of the segments before this one.
    pub offset: usize,
}

// =============================================================================
// AGGREGATION
// =============================================================================

/// Classify every record and summarize the batch.
///
/// The batch is all-or-nothing: the first invalid record aborts with
/// `StockError::InvalidRecord` carrying its 1-based position, and no partial
/// summary is produced. Use [`crate::screen`] to separate bad rows first.
pub fn aggregate(records: &[ProductRecord]) -> Result<StockSummary, StockError> {
    check_batch_size(records.len())?;

    let mut out_of_stock = 0usize;
    let mut low_stock = 0usize;
    let mut arriving = 0usize;
    let mut in_stock = 0usize;

    for (index, record) in records.iter().enumerate() {
        match classify(record).map_err(|e| e.at_position(index + 1))? {
            Status::OutOfStock => out_of_stock += 1,
            Status::LowStock => low_stock += 1,
            Status::Arriving => arriving += 1,
            Status::InStock => in_stock += 1,
        }
    }

    Ok(StockSummary::from_counts(
        out_of_stock,
        low_stock,
        arriving,
        in_stock,
    ))
}

/// `count / total * 100`, defined as 0 when `total` is 0.
///
/// This is the only floating-point step in the crate.
#[must_use]
#[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
pub fn weighted_percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 100.0) / total as f64
}

// =============================================================================
// TESTS
// =============================================================================
