//! Error types and HTTP error response handling.
//!
//! Every handler-level failure is logged and answered with a 303 redirect
//! to the console's error page. Form validation problems are not errors:
//! handlers re-render the form with field messages instead.

use crate::{render::RenderError, services::ServiceError};
use axum::response::{IntoResponse, Redirect, Response};

/// Fixed path of the generic error page.
pub const ERROR_PATH: &str = "/error";

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Backend**: a call for the page's primary data failed
/// - **Template**: the named template is missing or failed to render
/// - **Request**: a path or query parameter the handler cannot do without
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Backend call for primary data failed.
    #[error("backend call failed: {0}")]
    Backend(#[from] ServiceError),

    /// Template lookup or rendering failed.
    #[error("template error: {0}")]
    Template(#[from] RenderError),

    /// View model could not be serialized for the template.
    #[error("view model serialization failed: {0}")]
    ViewModel(#[from] serde_json::Error),

    /// A required path parameter was missing or malformed.
    #[error("invalid path parameter `{0}`")]
    InvalidPath(&'static str),

    /// The request cannot be served as sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Convert AppError into a redirect to the error page.
///
/// The detail only goes to the log; staff see the generic error page.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidPath(_) | AppError::InvalidRequest(_) => {
                tracing::warn!(error = %self, "rejecting request");
            }
            _ => tracing::error!(error = %self, "request failed"),
        }

        Redirect::to(ERROR_PATH).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{StatusCode, header};

    #[test]
    fn errors_redirect_to_error_page() {
        let response = AppError::InvalidPath("id").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], ERROR_PATH);

        let response = AppError::Backend(ServiceError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
