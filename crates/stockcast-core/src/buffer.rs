//! # Emergency Buffer Stock
//!
//! Demand rows and the per-product distribution of emergency buffer stock.

use crate::StockError;
use crate::table::read_table;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Historical vs forecasted demand for one product in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRow {
    pub category: String,
    pub product_name: String,
    pub historical_demand: i64,
    pub forecasted_demand: i64,
    pub emergency_buffer_stock: i64,
}

impl DemandRow {
    /// Forecasted minus historical demand.
    #[must_use]
    pub fn forecast_delta(&self) -> i64 {
        self.forecasted_demand
            .saturating_sub(self.historical_demand)
    }
}

/// Buffer stock held for one product, summed across categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferShare {
    pub product_name: String,
    pub buffer_stock: i64,
}

/// Emergency buffer stock grouped by product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferDistribution {
    /// One share per product name, sorted by name.
    pub shares: Vec<BufferShare>,
    /// Sum over all shares.
    pub total: i64,
}

/// Group rows by product name and sum their emergency buffer stock.
#[must_use]
pub fn buffer_distribution(rows: &[DemandRow]) -> BufferDistribution {
    let mut by_product: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows {
        let entry = by_product.entry(row.product_name.as_str()).or_insert(0);
        *entry = entry.saturating_add(row.emergency_buffer_stock);
    }

    let total = by_product
        .values()
        .fold(0i64, |acc, v| acc.saturating_add(*v));

    BufferDistribution {
        shares: by_product
            .into_iter()
            .map(|(name, buffer_stock)| BufferShare {
                product_name: name.to_string(),
                buffer_stock,
            })
            .collect(),
        total,
    }
}

/// Load demand rows from CSV.
///
/// Required columns: `Category`, `Product_Name`, `Historical_Demand`,
/// `Forecasted_Demand`, `Emergency_Buffer_Stock`.
pub fn load_demand<R: Read>(reader: R) -> Result<Vec<DemandRow>, StockError> {
    read_table(
        reader,
        &[
            "Category",
            "Product_Name",
            "Historical_Demand",
            "Forecasted_Demand",
            "Emergency_Buffer_Stock",
        ],
        |row| {
            Ok(DemandRow {
                category: row.text("Category").to_string(),
                product_name: row.text("Product_Name").to_string(),
                historical_demand: row.integer("Historical_Demand")?,
                forecasted_demand: row.integer("Forecasted_Demand")?,
                emergency_buffer_stock: row.integer("Emergency_Buffer_Stock")?,
            })
        },
    )
}
