//! Staff identity middleware.
//!
//! Sessions are terminated by the auth proxy in front of the console, which
//! forwards the signed-in staff member as request headers. This middleware:
//! 1. Reads the identity headers
//! 2. Redirects to the login page when no staff id is present
//! 3. Injects a [`StaffContext`] for handlers

use crate::state::Server;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

pub const STAFF_ID_HEADER: &str = "x-staff-id";
pub const STAFF_EMAIL_HEADER: &str = "x-staff-email";
pub const STAFF_ORG_HEADER: &str = "x-staff-org-id";
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// The staff member making the request.
///
/// Handlers extract this with `Extension<StaffContext>` to stamp
/// `updated_by` fields and to pass the CSRF token into forms.
#[derive(Debug, Clone, Default)]
pub struct StaffContext {
    pub user_id: String,
    pub email: String,
    pub org_id: String,

    /// Token the proxy issued for this session; echoed into every form
    pub csrf_token: String,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Identity middleware for every staff route.
///
/// # Returns
///
/// * The handler's response, with [`StaffContext`] available to it
/// * `303` to the configured login path when `x-staff-id` is missing or empty
pub async fn staff_identity(State(server): State<Server>, mut request: Request, next: Next) -> Response {
    let headers = request.headers();

    // Step 1: Require the staff id header
    let Some(user_id) = header_value(headers, STAFF_ID_HEADER) else {
        tracing::warn!(path = %request.uri().path(), "request without staff identity");
        return Redirect::to(&server.settings.login_path).into_response();
    };

    // Step 2: Collect the rest of the identity
    let context = StaffContext {
        user_id,
        email: header_value(headers, STAFF_EMAIL_HEADER).unwrap_or_default(),
        org_id: header_value(headers, STAFF_ORG_HEADER).unwrap_or_default(),
        csrf_token: header_value(headers, CSRF_TOKEN_HEADER).unwrap_or_default(),
    };

    // Step 3: Inject context into request extensions
    request.extensions_mut().insert(context);

    next.run(request).await
}
