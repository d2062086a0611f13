//! # Expiry Tracking
//!
//! Expiry-date validation, expired-product detection and the per-product
//! regulatory compliance report.
//!
//! Category is a plain field on each entry. Entries from every category live
//! in one table and are filtered by value.

use crate::StockError;
use crate::primitives::{COMPLIANT_TEMPERATURES, EXPIRY_DATE_FORMAT};
use crate::table::read_table;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// An expiry record for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryEntry {
    pub category: String,
    pub product_id: String,
    pub expiry_date: NaiveDate,
    /// Storage requirement, e.g. "Room Temperature". Absent if unknown.
    pub temperature_requirement: Option<String>,
}

/// Parse an expiry date in `YYYY-MM-DD` form.
pub fn parse_expiry_date(raw: &str) -> Result<NaiveDate, StockError> {
    NaiveDate::parse_from_str(raw.trim(), EXPIRY_DATE_FORMAT).map_err(|_| {
        StockError::InvalidDate {
            value: raw.to_string(),
        }
    })
}

// =============================================================================
// EXPIRED PRODUCTS
// =============================================================================

/// A product whose expiry date has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredProduct {
    pub category: String,
    pub product_id: String,
    pub expiry_date: NaiveDate,
}

/// List entries that expired strictly before `today`, in input order.
///
/// A product expiring today is not yet expired.
#[must_use]
pub fn find_expired(entries: &[ExpiryEntry], today: NaiveDate) -> Vec<ExpiredProduct> {
    entries
        .iter()
        .filter(|e| e.expiry_date < today)
        .map(|e| ExpiredProduct {
            category: e.category.clone(),
            product_id: e.product_id.clone(),
            expiry_date: e.expiry_date,
        })
        .collect()
}

/// Find the entry for a product, optionally restricted to one category.
#[must_use]
pub fn find_entry<'a>(
    entries: &'a [ExpiryEntry],
    category: Option<&str>,
    product_id: &str,
) -> Option<&'a ExpiryEntry> {
    entries.iter().find(|e| {
        e.product_id == product_id && category.is_none_or(|c| e.category == c)
    })
}

// =============================================================================
// COMPLIANCE
// =============================================================================

/// Outcome of a single compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compliance {
    #[serde(rename = "Compliant")]
    Compliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl Compliance {
    fn from_bool(ok: bool) -> Self {
        if ok {
            Compliance::Compliant
        } else {
            Compliance::NonCompliant
        }
    }

    /// Display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compliance::Compliant => "Compliant",
            Compliance::NonCompliant => "Non-Compliant",
        }
    }
}

/// Compliance report for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub category: String,
    pub product_id: String,
    /// Compliant while the expiry date is strictly in the future.
    pub expiry: Compliance,
    /// Compliant for room-temperature or cool storage only.
    pub temperature: Compliance,
    pub temperature_requirement: Option<String>,
}

/// Check one product's expiry and storage compliance as of `today`.
#[must_use]
pub fn check_compliance(entry: &ExpiryEntry, today: NaiveDate) -> ComplianceReport {
    let temperature_ok = entry
        .temperature_requirement
        .as_deref()
        .is_some_and(|t| COMPLIANT_TEMPERATURES.contains(&t));

    ComplianceReport {
        category: entry.category.clone(),
        product_id: entry.product_id.clone(),
        expiry: Compliance::from_bool(entry.expiry_date > today),
        temperature: Compliance::from_bool(temperature_ok),
        temperature_requirement: entry.temperature_requirement.clone(),
    }
}

// =============================================================================
// LOADER
// =============================================================================

/// Load expiry entries from CSV.
///
/// Required columns: `Category`, `Product_ID`, `Expiry_Date`.
/// Optional column: `Temperature_Requirement`.
///
/// A bad date fails with `MalformedRecord` so the line number is reported.
pub fn load_expiry<R: Read>(reader: R) -> Result<Vec<ExpiryEntry>, StockError> {
    read_table(reader, &["Category", "Product_ID", "Expiry_Date"], |row| {
        Ok(ExpiryEntry {
            category: row.text("Category").to_string(),
            product_id: row.text("Product_ID").to_string(),
            expiry_date: parse_expiry_date(row.text("Expiry_Date"))
                .map_err(|_| row.malformed("Expiry_Date", "date (YYYY-MM-DD)"))?,
            temperature_requirement: row
                .optional_text("Temperature_Requirement")
                .map(str::to_string),
        })
    })
}
