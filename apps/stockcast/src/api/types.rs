//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use serde::{Deserialize, Serialize};
use stockcast_core::{
    ChartSlice, ComparisonPoint, ProductRecord, PyramidSegment, Status, StockSummary,
};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Bare `{success: false, error}` envelope for requests refused before any
/// handler runs (authentication, rate limiting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// =============================================================================
// RECORDS REQUEST
// =============================================================================

/// A batch of product records posted by the client.
///
/// Field names accept both `product_name` and the CSV spelling `Product_Name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsRequest {
    pub records: Vec<ProductRecord>,
}

// =============================================================================
// SUMMARY RESPONSE
// =============================================================================

/// Stock-status summary response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: Option<StockSummary>,
    pub error: Option<String>,
}

impl SummaryResponse {
    pub fn success(summary: StockSummary) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CLASSIFY RESPONSE
// =============================================================================

/// One record with its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    pub product_name: String,
    pub stock_level: i64,
    pub max_capacity: i64,
    pub status: Status,
}

/// Per-record classification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub success: bool,
    pub products: Vec<ClassifiedRecord>,
    pub error: Option<String>,
}

impl ClassifyResponse {
    pub fn success(records: Vec<ProductRecord>, statuses: Vec<Status>) -> Self {
        let products = records
            .into_iter()
            .zip(statuses)
            .map(|(record, status)| ClassifiedRecord {
                product_name: record.product_name,
                stock_level: record.stock_level,
                max_capacity: record.max_capacity,
                status,
            })
            .collect();

        Self {
            success: true,
            products,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            products: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// COMPARISON
// =============================================================================

/// Query string for `GET /comparison`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonParams {
    pub predicted: Option<i64>,
}

/// Actual vs predicted series response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResponse {
    pub success: bool,
    pub predicted_stock_level: Option<u8>,
    pub points: Vec<ComparisonPoint>,
    pub error: Option<String>,
}

impl ComparisonResponse {
    pub fn success(predicted_stock_level: u8, points: Vec<ComparisonPoint>) -> Self {
        Self {
            success: true,
            predicted_stock_level: Some(predicted_stock_level),
            points,
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            predicted_stock_level: None,
            points: vec![],
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// BREAKDOWN RESPONSE
// =============================================================================

/// Chart data: pie slices and pyramid segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownResponse {
    pub success: bool,
    /// Zero means every slice is zero and the chart has nothing to show.
    pub total_count: usize,
    pub slices: Vec<ChartSlice>,
    pub pyramid: Vec<PyramidSegment>,
    pub error: Option<String>,
}

impl BreakdownResponse {
    pub fn success(summary: &StockSummary) -> Self {
        Self {
            success: true,
            total_count: summary.total_count,
            slices: summary.slices(),
            pyramid: summary.pyramid(),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            total_count: 0,
            slices: vec![],
            pyramid: vec![],
            error: Some(msg.into()),
        }
    }
}
