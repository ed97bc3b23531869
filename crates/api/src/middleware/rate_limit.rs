//! Per-key fixed-window rate limiting.
//!
//! The limiter is injected through [`AppState`] with an explicit
//! [`RateLimiter::check_and_consume`] interface rather than living in a
//! process global, so tests get isolated instances and the backing store
//! can be swapped for a shared counter service.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Outcome of consuming one request from a key's budget.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// When the current window ends.
    pub reset_at: SystemTime,
}

struct WindowState {
    window_start: SystemTime,
    hits: u32,
}

/// Fixed-window request throttle keyed by caller identity.
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<String, WindowState>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Consume one request from `key`'s budget, rolling the window forward
    /// if it has elapsed.
    pub fn check_and_consume(&self, key: &str) -> RateLimitDecision {
        let now = SystemTime::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let entry = windows.entry(key.to_string()).or_insert(WindowState {
            window_start: now,
            hits: 0,
        });

        let elapsed = now
            .duration_since(entry.window_start)
            .unwrap_or(Duration::ZERO);
        if elapsed >= self.window {
            entry.window_start = now;
            entry.hits = 0;
        }

        let reset_at = entry.window_start + self.window;
        if entry.hits >= self.max_requests {
            return RateLimitDecision {
                allowed: false,
                limit: self.max_requests,
                remaining: 0,
                reset_at,
            };
        }

        entry.hits += 1;
        RateLimitDecision {
            allowed: true,
            limit: self.max_requests,
            remaining: self.max_requests - entry.hits,
            reset_at,
        }
    }
}

/// Axum middleware applying the injected [`RateLimiter`] to every request.
///
/// Keyed by authenticated user id when a valid token is present, falling
/// back to the forwarded client IP.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let key = match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) => format!("user:{}", user.user_id),
        Err(_) => client_key(&parts.headers),
    };
    let request = Request::from_parts(parts, body);

    let decision = state.rate_limiter.check_and_consume(&key);
    if !decision.allowed {
        tracing::warn!(%key, "Rate limit exceeded");
        let body = json!({
            "error": "Too Many Requests",
            "code": "RATE_LIMITED",
        });
        let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
        apply_headers(response.headers_mut(), &decision);
        return response;
    }

    let mut response = next.run(request).await;
    apply_headers(response.headers_mut(), &decision);
    response
}

fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            return format!("ip:{}", first.trim());
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return format!("ip:{}", real_ip.trim());
    }
    "ip:anonymous".to_string()
}

fn apply_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    let reset_ms = decision
        .reset_at
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis();

    if let Ok(value) = HeaderValue::from_str(&decision.limit.to_string()) {
        headers.insert("x-rate-limit-limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("x-rate-limit-remaining", value);
    }
    if let Ok(value) = HeaderValue::from_str(&reset_ms.to_string()) {
        headers.insert("x-rate-limit-reset", value);
    }
}
