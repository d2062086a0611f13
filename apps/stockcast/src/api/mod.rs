//! # StockCast HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /summary` - Summary of the configured inventory file
//! - `POST /summary` - Summary of posted records
//! - `POST /classify` - Status of each posted record
//! - `GET /comparison?predicted=N` - Actual vs predicted stock
//! - `GET /breakdown` - Pie slices and pyramid segments
//!
//! ## Access Control
//!
//! CORS origins, the request budget and the optional API key all come from
//! the resolved [`Settings`] (see [`crate::config`]); nothing here reads the
//! environment.

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::ApiKey;
pub use middleware::RequestBudget;
pub use types::{
    BreakdownResponse, ClassifiedRecord, ClassifyResponse, ComparisonParams, ComparisonResponse,
    ErrorResponse, HealthResponse, RecordsRequest, SummaryResponse,
};

use crate::config::{CorsOrigins, Settings};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use std::sync::Arc;
use stockcast_core::StockError;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum accepted request body (2 MiB).
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Origins of a locally served dashboard.
const LOCALHOST_ORIGINS: [&str; 6] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://localhost:8501",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
    "http://127.0.0.1:8501",
];

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer for the configured origins.
fn build_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => {
            tracing::warn!("CORS: allowing ALL origins; do not use this in production");
            CorsLayer::permissive()
        }
        CorsOrigins::Localhost => {
            tracing::info!("CORS: localhost origins only");
            restricted_cors(header_values(LOCALHOST_ORIGINS.iter().copied()))
        }
        CorsOrigins::List(list) => {
            let allowed = header_values(list.iter().map(String::as_str));
            if allowed.is_empty() {
                tracing::warn!("CORS: no valid configured origin, using localhost only");
                restricted_cors(header_values(LOCALHOST_ORIGINS.iter().copied()))
            } else {
                tracing::info!("CORS: allowing {} configured origin(s)", allowed.len());
                restricted_cors(allowed)
            }
        }
    }
}

/// Parse origins into header values, skipping the unparsable ones.
fn header_values<'a>(origins: impl Iterator<Item = &'a str>) -> Vec<HeaderValue> {
    origins
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("CORS: invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if configured)
pub fn create_router(state: AppState) -> Router {
    let settings = Arc::clone(&state.settings);

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/summary",
            get(handlers::summary_handler).post(handlers::summary_records_handler),
        )
        .route("/classify", post(handlers::classify_handler))
        .route("/comparison", get(handlers::comparison_handler))
        .route("/breakdown", get(handlers::breakdown_handler));

    match settings.api_key.clone() {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            router = router.layer(axum_middleware::from_fn_with_state(key, auth::require_api_key));
        }
        None => tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set api_key or STOCKCAST_API_KEY to enable authentication."
        ),
    }

    match RequestBudget::per_second(settings.rate_limit) {
        Some(budget) => {
            tracing::info!("Rate limiting enabled: {} requests/second", settings.rate_limit);
            router = router.layer(axum_middleware::from_fn_with_state(
                budget,
                middleware::enforce_budget,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&settings.cors_origins))
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(settings: Settings) -> Result<(), StockError> {
    let addr = settings.bind_addr();
    let router = create_router(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StockError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("StockCast HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StockError::IoError(format!("Server error: {}", e)))
}

/// Resolves on Ctrl+C. In-flight requests finish before the server exits.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
