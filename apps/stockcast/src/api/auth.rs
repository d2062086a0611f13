//! # Authentication
//!
//! Optional shared-key check for the StockCast HTTP API.
//!
//! The key is part of the resolved [`Settings`](crate::config::Settings)
//! (`api_key` in the config file or `STOCKCAST_API_KEY`). Without one every
//! route is open. With one, clients send:
//!
//! ```text
//! Authorization: Bearer <key>
//! ```
//!
//! A bare `<key>` is accepted too. `/health` never needs a key.

use super::types::ErrorResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::fmt;
use std::sync::Arc;
use subtle::{Choice, ConstantTimeEq};

/// Route reachable without a key.
const OPEN_PATH: &str = "/health";

/// The configured API key. Its `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// Wrap a configured key. A blank key means no key.
    pub fn new(key: impl AsRef<str>) -> Option<Self> {
        let key = key.as_ref().trim();
        (!key.is_empty()).then(|| Self(Arc::from(key)))
    }

    /// Compare a presented key in constant time.
    ///
    /// Every byte position up to the longer of the two is visited, so a
    /// short guess costs as much as a full-length one.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();

        let same_len = (expected.len() as u64).ct_eq(&(presented.len() as u64));
        let span = expected.len().max(presented.len());
        let same_bytes = (0..span).fold(Choice::from(1), |acc, i| {
            let want = expected.get(i).copied().unwrap_or(0);
            let got = presented.get(i).copied().unwrap_or(0);
            acc & want.ct_eq(&got)
        });

        (same_len & same_bytes).into()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// The key a request presents in `Authorization`, with any `Bearer ` prefix
/// removed.
fn presented_key(request: &Request<Body>) -> Option<&str> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value).trim())
}

/// Refuse requests that do not carry the configured key.
pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == OPEN_PATH {
        return next.run(request).await;
    }

    let refusal = match presented_key(&request) {
        Some(presented) if key.matches(presented) => None,
        Some(_) => Some("invalid_api_key"),
        None => Some("missing_authorization_header"),
    };

    match refusal {
        None => next.run(request).await,
        Some(reason) => {
            tracing::warn!(
                event = "auth_failure",
                reason,
                path = %request.uri().path(),
                "Request refused"
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Unauthorized")),
            )
                .into_response()
        }
    }
}
