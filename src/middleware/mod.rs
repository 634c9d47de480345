//! HTTP middleware components.

/// Staff identity extraction
pub mod auth;
