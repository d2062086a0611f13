//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::{api, config::Settings};
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};
use stockcast_core::{
    FinancialSummary, ProductRecord, Status, StockError, StockSummary, aggregate,
    buffer_distribution, check_compliance, classify_batch, compare, find_entry, find_expired,
    format_amount, load_demand, load_expenses, load_expiry, load_inventory_file, load_sales,
    primitives::MAX_INPUT_FILE_SIZE, screen, top_by_revenue,
};

// =============================================================================
// INPUT FILES
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), StockError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| StockError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(StockError::LimitExceeded(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve a user-supplied input path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, StockError> {
    let canonical = path.canonicalize().map_err(|e| {
        StockError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(StockError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Open a required input CSV after path and size checks.
fn open_input(path: &Path) -> Result<File, StockError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;

    File::open(&validated)
        .map_err(|e| StockError::IoError(format!("Cannot open '{}': {}", path.display(), e)))
}

/// Load the configured inventory. A missing file is an empty table.
fn load_records(settings: &Settings) -> Result<Vec<ProductRecord>, StockError> {
    match load_inventory_file(&settings.inventory_path)? {
        Some(records) => {
            tracing::debug!(
                "Loaded {} records from {:?}",
                records.len(),
                settings.inventory_path
            );
            Ok(records)
        }
        None => {
            tracing::warn!(
                "Inventory file {:?} not found, reporting empty inventory",
                settings.inventory_path
            );
            Ok(Vec::new())
        }
    }
}

/// Print a JSON value in pretty form.
fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: Settings) -> Result<(), StockError> {
    println!("StockCast Inventory Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:      {}", settings.host);
    println!("  Port:      {}", settings.port);
    println!("  Inventory: {:?}", settings.inventory_path);
    println!("  Predicted: {}", settings.predicted_stock_level);
    let auth = settings.api_key.as_ref().map_or("open", |_| "api key");
    println!("  Auth:      {}", auth);
    println!("  Rate:      {} req/s (0 = unlimited)", settings.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET  /summary    - Stock-status summary of the inventory file");
    println!("  POST /summary    - Summary of posted records");
    println!("  POST /classify   - Status of each posted record");
    println!("  GET  /comparison - Actual vs predicted stock");
    println!("  GET  /breakdown  - Chart slices and pyramid segments");
    println!("  GET  /health     - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(settings).await
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show stock-status metric tiles.
pub fn cmd_summary(settings: &Settings, json_mode: bool, verbose: bool) -> Result<(), StockError> {
    let records = load_records(settings)?;
    let summary = aggregate(&records)?;

    if json_mode {
        let output = serde_json::json!({
            "inventory": settings.inventory_path.to_string_lossy(),
            "summary": summary,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Inventory Status");
    println!("================");
    println!("Inventory: {:?}", settings.inventory_path);
    println!();
    print_tiles(&summary);

    if verbose {
        println!();
        println!("Pyramid:");
        for segment in summary.pyramid() {
            println!(
                "  {:<15} {:>6}  (from {})",
                segment.label, segment.count, segment.offset
            );
        }
    }

    Ok(())
}

fn print_tiles(summary: &StockSummary) {
    for status in [Status::LowStock, Status::Arriving, Status::OutOfStock] {
        println!(
            "{:<16}{:>6}  ({:.2}%)",
            format!("{}:", status.label()),
            summary.count(status),
            summary.percentage(status).unwrap_or_default()
        );
    }
    println!("{:<16}{:>6}", "In Stock:", summary.in_stock_count);
    println!("{:<16}{:>6}", "Total:", summary.total_count);
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Show the status of every product.
///
/// Strict mode aborts on the first invalid record. Lenient mode classifies
/// the valid rows and lists the rejected ones.
pub fn cmd_classify(settings: &Settings, json_mode: bool, lenient: bool) -> Result<(), StockError> {
    let records = load_records(settings)?;

    let (valid, rejected) = if lenient {
        let screening = screen(&records)?;
        (screening.valid, screening.rejected)
    } else {
        (records, Vec::new())
    };
    let statuses = classify_batch(&valid)?;

    if json_mode {
        let products: Vec<_> = valid
            .iter()
            .zip(&statuses)
            .map(|(record, status)| {
                serde_json::json!({
                    "product_name": record.product_name,
                    "stock_level": record.stock_level,
                    "max_capacity": record.max_capacity,
                    "status": status,
                })
            })
            .collect();
        let errors: Vec<String> = rejected.iter().map(ToString::to_string).collect();
        print_json(&serde_json::json!({ "products": products, "rejected": errors }));
        return Ok(());
    }

    println!("{:<32} {:>8} {:>8}  Status", "Product", "Stock", "Capacity");
    for (record, status) in valid.iter().zip(&statuses) {
        println!(
            "{:<32} {:>8} {:>8}  {}",
            record.product_name,
            record.stock_level,
            record.max_capacity,
            status.label()
        );
    }

    if !rejected.is_empty() {
        println!();
        println!("Rejected ({}):", rejected.len());
        for error in &rejected {
            println!("  {}", error);
        }
    }

    Ok(())
}

// =============================================================================
// COMPARE COMMAND
// =============================================================================

/// Print actual stock against the predicted level.
pub fn cmd_compare(settings: &Settings, json_mode: bool) -> Result<(), StockError> {
    let records = load_records(settings)?;
    let points = compare(&records, settings.predicted_stock_level);

    if json_mode {
        print_json(&serde_json::json!({
            "predicted_stock_level": settings.predicted_stock_level.value(),
            "points": points,
        }));
        return Ok(());
    }

    println!(
        "Actual vs Predicted Stock (predicted: {})",
        settings.predicted_stock_level
    );
    println!("{:>5}  {:<32} {:>8} {:>10}", "#", "Product", "Actual", "Predicted");
    for point in &points {
        println!(
            "{:>5}  {:<32} {:>8} {:>10}",
            point.index, point.product_name, point.actual, point.predicted
        );
    }

    Ok(())
}

// =============================================================================
// EXPIRY COMMANDS
// =============================================================================

/// List products whose expiry date is before `today`.
pub fn cmd_expired(file: &Path, today: NaiveDate, json_mode: bool) -> Result<(), StockError> {
    let entries = load_expiry(open_input(file)?)?;
    let expired = find_expired(&entries, today);

    if json_mode {
        print_json(&serde_json::json!({
            "today": today,
            "expired": expired,
        }));
        return Ok(());
    }

    if expired.is_empty() {
        println!("No expired products as of {}", today);
        return Ok(());
    }

    println!("Expired products as of {}:", today);
    for product in &expired {
        println!(
            "  {:<20} {:<16} expired {}",
            product.category, product.product_id, product.expiry_date
        );
    }

    Ok(())
}

/// Expiry and temperature compliance for one product.
pub fn cmd_compliance(
    file: &Path,
    product_id: &str,
    category: Option<&str>,
    today: NaiveDate,
    json_mode: bool,
) -> Result<(), StockError> {
    let entries = load_expiry(open_input(file)?)?;

    let Some(entry) = find_entry(&entries, category, product_id) else {
        return Err(StockError::InvalidParameter(format!(
            "Product ID {:?} not found",
            product_id
        )));
    };
    let report = check_compliance(entry, today);

    if json_mode {
        print_json(&serde_json::json!(report));
        return Ok(());
    }

    println!("Compliance Report");
    println!("=================");
    println!("Category:    {}", report.category);
    println!("Product ID:  {}", report.product_id);
    println!("Expiry:      {}", report.expiry.as_str());
    println!("Temperature: {}", report.temperature.as_str());
    if let Some(requirement) = &report.temperature_requirement {
        println!("Storage:     {}", requirement);
    }

    Ok(())
}

// =============================================================================
// BUFFER COMMAND
// =============================================================================

/// Show emergency buffer stock per product.
pub fn cmd_buffer(file: &Path, json_mode: bool) -> Result<(), StockError> {
    let rows = load_demand(open_input(file)?)?;
    let distribution = buffer_distribution(&rows);

    if json_mode {
        print_json(&serde_json::json!(distribution));
        return Ok(());
    }

    println!("Emergency Buffer Stock");
    println!("======================");
    for share in &distribution.shares {
        println!("  {:<32} {:>8}", share.product_name, share.buffer_stock);
    }
    println!("  {:<32} {:>8}", "Total", distribution.total);

    Ok(())
}

// =============================================================================
// FINANCE COMMAND
// =============================================================================

/// Revenue, expenses, profit and the top products by revenue.
pub fn cmd_finance(
    sales_file: &Path,
    expenses_file: &Path,
    top: usize,
    json_mode: bool,
) -> Result<(), StockError> {
    let sales = load_sales(open_input(sales_file)?)?;
    let expenses = load_expenses(open_input(expenses_file)?)?;

    let summary = FinancialSummary::compute(&sales, &expenses);
    let leaders = top_by_revenue(&sales, top);

    if json_mode {
        print_json(&serde_json::json!({
            "summary": summary,
            "top_products": leaders,
        }));
        return Ok(());
    }

    println!("Financial Summary");
    println!("=================");
    println!("Revenue:  {}", format_amount(summary.revenue));
    println!("Expenses: {}", format_amount(summary.expenses));
    println!("Profit:   {}", format_amount(summary.profit));
    println!();
    println!("Top {} products by revenue:", leaders.len());
    for line in &leaders {
        println!("  {:<32} {:>14}", line.product, format_amount(line.revenue));
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
