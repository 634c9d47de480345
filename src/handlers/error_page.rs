//! Generic error page every failed request is redirected to.

use crate::state::Server;
use axum::{extract::State, response::Html};
use serde_json::json;

const TEMPLATE: &str = "error.html";

/// Served when `error.html` itself cannot be rendered.
pub const FALLBACK_BODY: &str = "<!DOCTYPE html>\
<html><head><title>Something went wrong</title></head>\
<body><h1>Something went wrong</h1>\
<p>The request could not be completed. Please go back and try again.</p>\
</body></html>";

/// Render the error page.
///
/// This handler never fails: a broken template falls back to a static body
/// instead of redirecting to itself.
pub async fn error_page(State(server): State<Server>) -> Html<String> {
    match server.renderer.render(TEMPLATE, &json!({})) {
        Ok(body) => Html(body),
        Err(e) => {
            tracing::error!(error = %e, "error page template unavailable");
            Html(FALLBACK_BODY.to_string())
        }
    }
}
