//! # Financial Summary
//!
//! Revenue, expenses and profit, plus the top products by revenue.
//!
//! Amounts are [`Decimal`] with at most two fractional digits. Sums saturate
//! instead of overflowing.

use crate::StockError;
use crate::table::{Row, read_table};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// Fractional digits carried by every amount.
const AMOUNT_SCALE: u32 = 2;

/// Revenue and purchase cost for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesLine {
    pub product: String,
    pub revenue: Decimal,
    pub purchase_cost: Decimal,
}

/// One expense category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: String,
    pub amount: Decimal,
}

/// Totals for the financial summary tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub revenue: Decimal,
    pub expenses: Decimal,
    /// Revenue minus expenses; negative for a loss.
    pub profit: Decimal,
}

impl FinancialSummary {
    /// Sum sales revenue and expense amounts.
    #[must_use]
    pub fn compute(sales: &[SalesLine], expenses: &[ExpenseLine]) -> Self {
        let revenue = sales
            .iter()
            .fold(Decimal::ZERO, |acc, s| acc.saturating_add(s.revenue));
        let expenses = expenses
            .iter()
            .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount));

        Self {
            revenue,
            expenses,
            profit: revenue.saturating_sub(expenses),
        }
    }
}

/// The `n` highest-revenue lines, highest first. Ties keep input order.
#[must_use]
pub fn top_by_revenue(sales: &[SalesLine], n: usize) -> Vec<SalesLine> {
    let mut ranked: Vec<&SalesLine> = sales.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    ranked.into_iter().take(n).cloned().collect()
}

/// Format an amount as dollars with thousands separators, e.g. `$90,700.00`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.abs().round_dp(AMOUNT_SCALE);
    rounded.rescale(AMOUNT_SCALE);
    let fixed = rounded.to_string();
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Read a money column. More than two significant fractional digits is
/// malformed; accepted values are rescaled to exactly two.
fn amount(row: &Row<'_>, column: &'static str) -> Result<Decimal, StockError> {
    let mut value = Decimal::from_str(row.text(column))
        .map_err(|_| row.malformed(column, "decimal amount"))?;
    if value.round_dp(AMOUNT_SCALE) != value {
        return Err(row.malformed(column, "amount with at most two decimal places"));
    }
    value.rescale(AMOUNT_SCALE);
    Ok(value)
}

/// Load sales lines from CSV with columns `Product`, `Revenue`, `Purchase_Cost`.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<SalesLine>, StockError> {
    read_table(reader, &["Product", "Revenue", "Purchase_Cost"], |row| {
        Ok(SalesLine {
            product: row.text("Product").to_string(),
            revenue: amount(row, "Revenue")?,
            purchase_cost: amount(row, "Purchase_Cost")?,
        })
    })
}

/// Load expense lines from CSV with columns `Category`, `Amount`.
pub fn load_expenses<R: Read>(reader: R) -> Result<Vec<ExpenseLine>, StockError> {
    read_table(reader, &["Category", "Amount"], |row| {
        Ok(ExpenseLine {
            category: row.text("Category").to_string(),
            amount: amount(row, "Amount")?,
        })
    })
}
