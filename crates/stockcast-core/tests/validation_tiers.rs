//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, the dashboard numbers are wrong.
//!
//! ## Tiers
//! - T0: Record Integrity
//! - T1: Status Boundaries
//! - T2: Batch Aggregation
//! - T3: File to Summary

use stockcast_core::{ProductRecord, Status, StockError, StockSummary, aggregate, classify};

fn record(name: &str, stock: i64, capacity: i64) -> ProductRecord {
    ProductRecord::new(name, stock, capacity)
}

// =============================================================================
// TIER T0: RECORD INTEGRITY
// =============================================================================

mod t0_record_integrity {
    use super::*;

    /// T0.1: Valid records classify.
    #[test]
    fn valid_record_accepted() {
        assert!(classify(&record("Bandages", 40, 100)).is_ok());
    }

    /// T0.2: Zero capacity is InvalidRecord, never a division fault.
    #[test]
    fn zero_capacity_rejected() {
        let result = classify(&record("Ventilator", 5, 0));
        assert!(matches!(result, Err(StockError::InvalidRecord { .. })));
    }

    /// T0.3: The error names the record and the field.
    #[test]
    fn error_names_record_and_field() {
        let err = aggregate(&[record("Gloves", 1, 10), record("Defibrillator", 5, 0)])
            .expect_err("invalid");
        let message = err.to_string();
        assert!(message.contains("#2"), "{message}");
        assert!(message.contains("Defibrillator"), "{message}");
        assert!(message.contains("Max_Capacity"), "{message}");
    }

    /// T0.4: Classification is deterministic.
    #[test]
    fn classification_deterministic() {
        let r = record("Ultrasound Machine", 33, 120);
        assert_eq!(classify(&r).expect("first"), classify(&r).expect("second"));
    }
}

// =============================================================================
// TIER T1: STATUS BOUNDARIES
// =============================================================================

mod t1_status_boundaries {
    use super::*;

    /// T1.1: Walk every stock level for capacity 10.
    #[test]
    fn full_walk_capacity_ten() {
        let expected = [
            Status::OutOfStock, // 0
            Status::LowStock,   // 1
            Status::InStock,    // 2 == 20%
            Status::Arriving,   // 3
            Status::Arriving,
            Status::Arriving,
            Status::Arriving,
            Status::Arriving,
            Status::Arriving,
            Status::Arriving, // 9
            Status::InStock,  // 10
            Status::InStock,  // 11
        ];

        for (stock, want) in expected.iter().enumerate() {
            let got = classify(&record("Stethoscope", stock as i64, 10)).expect("classify");
            assert_eq!(got, *want, "stock {stock}");
        }
    }

    /// T1.2: Over-capacity stock is in stock.
    #[test]
    fn over_capacity_in_stock() {
        assert_eq!(
            classify(&record("X-Ray Machine", 1_000, 3)).expect("classify"),
            Status::InStock
        );
    }
}

// =============================================================================
// TIER T2: BATCH AGGREGATION
// =============================================================================

mod t2_batch_aggregation {
    use super::*;

    /// T2.1: One record per status gives 25% each.
    #[test]
    fn quarter_split() {
        let summary = aggregate(&[
            record("a", 0, 100),
            record("b", 15, 100),
            record("c", 50, 100),
            record("d", 100, 100),
        ])
        .expect("aggregate");

        assert_eq!(summary.out_of_stock_count, 1);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.arriving_count, 1);
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.low_stock_pct, 25.0);
        assert_eq!(summary.arriving_pct, 25.0);
        assert_eq!(summary.out_of_stock_pct, 25.0);
    }

    /// T2.2: Empty input is all zeros.
    #[test]
    fn empty_is_zero() {
        assert_eq!(aggregate(&[]).expect("aggregate"), StockSummary::empty());
    }

    /// T2.3: Duplicate product names are counted separately.
    #[test]
    fn duplicate_names_counted() {
        let summary = aggregate(&[record("Aspirin", 0, 10), record("Aspirin", 0, 10)])
            .expect("aggregate");
        assert_eq!(summary.out_of_stock_count, 2);
        assert_eq!(summary.out_of_stock_pct, 100.0);
    }
}

// =============================================================================
// TIER T3: FILE TO SUMMARY
// =============================================================================

mod t3_file_to_summary {
    use super::*;
    use std::io::Write;
    use stockcast_core::summarize_file;

    /// T3.1: Missing file is zeroed metrics, not an error.
    #[test]
    fn missing_file_zeroed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let summary = summarize_file(&dir.path().join("daily.csv")).expect("summary");
        assert_eq!(summary, StockSummary::empty());
    }

    /// T3.2: Malformed file is reported, not zeroed.
    #[test]
    fn malformed_file_reported() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"Product_Name,Stock_Level,Max_Capacity\nGloves,1.5,10\n")
            .expect("write");

        assert!(matches!(
            summarize_file(file.path()),
            Err(StockError::MalformedRecord { line: 2, field: "Stock_Level", .. })
        ));
    }

    /// T3.3: A well-formed file aggregates.
    #[test]
    fn file_aggregates() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(
            b"Product_Name,Stock_Level,Max_Capacity\nGloves,0,10\nMasks,1,10\nGowns,5,10\n",
        )
        .expect("write");

        let summary = summarize_file(file.path()).expect("summary");
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.out_of_stock_count, 1);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.arriving_count, 1);
    }
}
