//! # Rate Limiting
//!
//! One request budget shared by every route, sized by `rate_limit` in the
//! resolved settings (requests per second; 0 turns limiting off).
//! Over-budget requests get `429` with a `Retry-After` hint in seconds.

use super::types::ErrorResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Process-wide request budget.
#[derive(Clone)]
pub struct RequestBudget {
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl RequestBudget {
    /// A budget of `requests_per_second`, or `None` when that is zero.
    pub fn per_second(requests_per_second: u32) -> Option<Self> {
        let rps = NonZeroU32::new(requests_per_second)?;
        Some(Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rps))),
        })
    }

    /// Spend one request. When the budget is empty, the error is the number
    /// of whole seconds until the next request fits, never less than one.
    fn spend(&self) -> Result<(), u64> {
        self.limiter.check().map_err(|not_until| {
            let wait = not_until.wait_time_from(self.limiter.clock().now());
            let rounded_up = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            rounded_up.max(1)
        })
    }
}

/// Refuse requests once the shared budget is spent.
pub async fn enforce_budget(
    State(budget): State<RequestBudget>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match budget.spend() {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::warn!(
                retry_after,
                path = %request.uri().path(),
                "Rate limit exceeded"
            );
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorResponse::new("Too Many Requests")),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}
