//! Health check endpoint for service monitoring.

use crate::{services::ServiceError, state::Server};
use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health check response.
///
/// Returns overall status and the reachability of each backend.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` when every backend answered, `degraded` otherwise
    pub status: &'static str,

    pub profile: &'static str,
    pub rbac: &'static str,
    pub sandbox_transactions: &'static str,
    pub live_transactions: &'static str,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

fn reachability(result: &Result<(), ServiceError>, service: &'static str) -> &'static str {
    match result {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!(service, error = %e, "backend health check failed");
            "unreachable"
        }
    }
}

/// Health check handler.
///
/// # Checks
///
/// - Profile, RBAC and both transaction services, pinged concurrently
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "profile": "connected",
///   "rbac": "connected",
///   "sandbox_transactions": "connected",
///   "live_transactions": "connected",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
///
/// # Response (503 Service Unavailable)
///
/// Same body with `"status": "degraded"` and the failing backends marked
/// `unreachable`.
pub async fn health_check(State(server): State<Server>) -> (StatusCode, Json<HealthResponse>) {
    let (profile, rbac, sandbox, live) = tokio::join!(
        server.profile.ping(),
        server.rbac.ping(),
        server.sandbox.ping(),
        server.live.ping(),
    );

    let healthy = profile.is_ok() && rbac.is_ok() && sandbox.is_ok() && live.is_ok();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        profile: reachability(&profile, "profile"),
        rbac: reachability(&rbac, "rbac"),
        sandbox_transactions: reachability(&sandbox, "sandbox transactions"),
        live_transactions: reachability(&live, "live transactions"),
        timestamp: Utc::now(),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
