//! # Property-Based Tests
//!
//! These tests ensure determinism and correctness invariants of the
//! classification and aggregation pipeline.

use proptest::collection::vec;
use proptest::prelude::*;
use stockcast_core::{ProductRecord, Status, aggregate, classify, screen};

fn valid_record() -> impl Strategy<Value = ProductRecord> {
    ("[a-zA-Z ]{1,20}", 0i64..10_000, 1i64..10_000)
        .prop_map(|(name, stock, capacity)| ProductRecord::new(name, stock, capacity))
}

fn any_record() -> impl Strategy<Value = ProductRecord> {
    ("[a-zA-Z]{1,8}", -50i64..500, -50i64..500)
        .prop_map(|(name, stock, capacity)| ProductRecord::new(name, stock, capacity))
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Zero stock is always out of stock.
    #[test]
    fn zero_stock_out_of_stock(capacity in 1i64..i64::MAX) {
        let status = classify(&ProductRecord::new("p", 0, capacity)).expect("classify");
        prop_assert_eq!(status, Status::OutOfStock);
    }

    /// Stock at or above capacity is in stock.
    #[test]
    fn at_or_over_capacity_in_stock(capacity in 1i64..1_000_000, extra in 0i64..1_000_000) {
        let record = ProductRecord::new("p", capacity + extra, capacity);
        let status = classify(&record).expect("classify");
        prop_assert_eq!(status, Status::InStock);
    }

    /// Non-positive capacity is always rejected.
    #[test]
    fn non_positive_capacity_rejected(stock in 0i64..1_000, capacity in -1_000i64..=0) {
        prop_assert!(classify(&ProductRecord::new("p", stock, capacity)).is_err());
    }

    /// Counts always sum to the total.
    #[test]
    fn counts_sum_to_total(records in vec(valid_record(), 0..200)) {
        let summary = aggregate(&records).expect("aggregate");
        let sum: usize = Status::ALL.iter().map(|s| summary.count(*s)).sum();

        prop_assert_eq!(sum, summary.total_count);
        prop_assert_eq!(summary.total_count, records.len());
    }

    /// Tracked percentages stay within [0, 100].
    #[test]
    fn percentages_bounded(records in vec(valid_record(), 0..200)) {
        let summary = aggregate(&records).expect("aggregate");
        for pct in [summary.low_stock_pct, summary.arriving_pct, summary.out_of_stock_pct] {
            prop_assert!((0.0..=100.0).contains(&pct), "pct {}", pct);
        }
    }

    /// Same input twice gives the same summary.
    #[test]
    fn aggregate_idempotent(records in vec(valid_record(), 0..100)) {
        prop_assert_eq!(aggregate(&records).expect("first"), aggregate(&records).expect("second"));
    }

    /// Screening never drops or invents records.
    #[test]
    fn screening_accounts_for_every_record(records in vec(any_record(), 0..100)) {
        let screening = screen(&records).expect("screen");
        prop_assert_eq!(screening.valid.len() + screening.rejected.len(), records.len());
        prop_assert!(aggregate(&screening.valid).is_ok());
        prop_assert_eq!(aggregate(&records).is_ok(), screening.is_clean());
    }

    /// Pyramid segments add up to the tracked counts.
    #[test]
    fn pyramid_ends_at_tracked_total(records in vec(valid_record(), 0..100)) {
        let summary = aggregate(&records).expect("aggregate");
        let pyramid = summary.pyramid();
        let last = &pyramid[pyramid.len() - 1];

        prop_assert_eq!(last.offset + last.count, summary.total_count - summary.in_stock_count);
    }
}
