//! Shared request state.

use crate::{
    error::AppError,
    models::user::ApiEnv,
    render::Renderer,
    services::{ProfileService, RbacService, TransactionService},
};
use axum::response::Html;
use serde::Serialize;
use std::sync::Arc;

/// Request-independent settings handlers consult.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Rows per list page
    pub per_page: u32,

    /// Upper bound on client-supplied repeat counts in forms
    pub max_form_rows: usize,

    /// Redirect target for requests without a staff identity
    pub login_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            per_page: 20,
            max_form_rows: 50,
            login_path: "/login".to_string(),
        }
    }
}

/// Backend clients and renderer shared by every handler.
///
/// Everything here is read-only after startup, so cloning per request is
/// just reference counting.
#[derive(Clone)]
pub struct Server {
    pub profile: Arc<dyn ProfileService>,
    pub rbac: Arc<dyn RbacService>,
    pub sandbox: Arc<dyn TransactionService>,
    pub live: Arc<dyn TransactionService>,
    pub renderer: Arc<dyn Renderer>,
    pub settings: Settings,
}

impl Server {
    /// Transaction service for the requested API environment.
    pub fn transactions(&self, env: ApiEnv) -> &dyn TransactionService {
        match env {
            ApiEnv::Sandbox => self.sandbox.as_ref(),
            ApiEnv::Live => self.live.as_ref(),
        }
    }

    /// Render a view model with the named template.
    pub fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<Html<String>, AppError> {
        let context = serde_json::to_value(view)?;
        let body = self.renderer.render(template, &context)?;
        Ok(Html(body))
    }
}
