//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Handlers that read the inventory file load it fresh on every request;
//! nothing is cached between requests. File reads run on tokio's blocking
//! pool. Malformed request bodies and query strings get the same
//! `{success, error}` envelope as every other failure.

use super::{
    AppState,
    types::{
        BreakdownResponse, ClassifyResponse, ComparisonParams, ComparisonResponse, HealthResponse,
        RecordsRequest, SummaryResponse,
    },
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use stockcast_core::{
    PredictedStockLevel, ProductRecord, StockError, StockSummary, aggregate, classify_batch,
    compare, load_inventory_file, summarize_file,
};

/// HTTP status for a failed operation.
///
/// Bad records are the client's data (422), bad parameters are the client's
/// request (400), everything else is ours (500).
fn error_status(error: &StockError) -> StatusCode {
    match error {
        e if e.is_record_error() => StatusCode::UNPROCESSABLE_ENTITY,
        StockError::MissingColumn(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StockError::InvalidParameter(_) | StockError::LimitExceeded(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Run a file-reading core call on the blocking pool.
async fn off_runtime<T, F>(work: F) -> Result<T, StockError>
where
    F: FnOnce() -> Result<T, StockError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| StockError::IoError(format!("Inventory read task failed: {}", e)))?
}

/// Load the configured inventory file. A missing file is an empty table.
async fn configured_records(state: &AppState) -> Result<Vec<ProductRecord>, StockError> {
    let path = state.settings.inventory_path.clone();
    off_runtime(move || load_inventory_file(&path).map(Option::unwrap_or_default)).await
}

/// Summarize the configured inventory file. A missing file is a zeroed summary.
async fn configured_summary(state: &AppState) -> Result<StockSummary, StockError> {
    let path = state.settings.inventory_path.clone();
    off_runtime(move || summarize_file(&path)).await
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SUMMARY HANDLERS
// =============================================================================

/// Summary of the configured inventory file.
pub async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    match configured_summary(&state).await {
        Ok(summary) => (StatusCode::OK, Json(SummaryResponse::success(summary))),
        Err(e) => {
            tracing::warn!("Summary failed: {}", e);
            (error_status(&e), Json(SummaryResponse::error(e.to_string())))
        }
    }
}

/// Summary of a posted batch.
pub async fn summary_records_handler(
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(SummaryResponse::error(rejection.body_text())),
            );
        }
    };

    match aggregate(&request.records) {
        Ok(summary) => (StatusCode::OK, Json(SummaryResponse::success(summary))),
        Err(e) => (error_status(&e), Json(SummaryResponse::error(e.to_string()))),
    }
}

// =============================================================================
// CLASSIFY HANDLER
// =============================================================================

/// Status of each posted record.
pub async fn classify_handler(
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(ClassifyResponse::error(rejection.body_text())),
            );
        }
    };

    match classify_batch(&request.records) {
        Ok(statuses) => (
            StatusCode::OK,
            Json(ClassifyResponse::success(request.records, statuses)),
        ),
        Err(e) => (error_status(&e), Json(ClassifyResponse::error(e.to_string()))),
    }
}

// =============================================================================
// COMPARISON HANDLER
// =============================================================================

/// Actual stock of the configured file against a predicted level.
///
/// `?predicted=N` overrides the configured level for this request only.
pub async fn comparison_handler(
    State(state): State<AppState>,
    params: Result<Query<ComparisonParams>, QueryRejection>,
) -> impl IntoResponse {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(ComparisonResponse::error(rejection.body_text())),
            );
        }
    };

    let predicted = match params.predicted {
        Some(raw) => match PredictedStockLevel::new(raw) {
            Ok(level) => level,
            Err(e) => {
                return (
                    error_status(&e),
                    Json(ComparisonResponse::error(e.to_string())),
                );
            }
        },
        None => state.settings.predicted_stock_level,
    };

    match configured_records(&state).await {
        Ok(records) => (
            StatusCode::OK,
            Json(ComparisonResponse::success(
                predicted.value(),
                compare(&records, predicted),
            )),
        ),
        Err(e) => (error_status(&e), Json(ComparisonResponse::error(e.to_string()))),
    }
}

// =============================================================================
// BREAKDOWN HANDLER
// =============================================================================

/// Pie slices and pyramid segments for the configured file.
pub async fn breakdown_handler(State(state): State<AppState>) -> impl IntoResponse {
    match configured_summary(&state).await {
        Ok(summary) => (StatusCode::OK, Json(BreakdownResponse::success(&summary))),
        Err(e) => (error_status(&e), Json(BreakdownResponse::error(e.to_string()))),
    }
}
