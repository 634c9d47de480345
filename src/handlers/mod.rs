//! HTTP request handlers.
//!
//! Each handler follows the same shape:
//! 1. Parse path, query or form parameters
//! 2. Call one or more backend services
//! 3. Build a view model and render a named template, or redirect

/// API client credentials
pub mod api_keys;
/// Branch (location) management
pub mod branches;
/// Currency settings
pub mod currency;
/// DSA applicant review
pub mod dashboard;
/// Error page
pub mod error_page;
/// Fee and commission schedules
pub mod fees;
/// Service health
pub mod health;
/// OAuth2 clients
pub mod oauth;
/// Partner integrations
pub mod partners;
/// Revenue-sharing rules
pub mod revenue_sharing;
/// Roles
pub mod roles;
/// Service enrollment requests
pub mod service_requests;
/// Transaction history
pub mod transactions;
/// Users
pub mod users;

use crate::{
    error::AppError,
    middleware::auth::StaffContext,
    models::{partner::PartnerType, user::ApiEnv},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters accepted by list views.
///
/// Every field is optional and kept raw; each view parses the ones it
/// understands through the shared filter tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    #[serde(rename = "search-term")]
    pub search_term: Option<String>,
    pub sort: Option<String>,
    pub sort_column: Option<String>,
    pub status: Option<String>,
    pub risk_score: Option<String>,
    pub services: Option<String>,
    pub invite_status: Option<String>,
    pub org_id: Option<String>,
    pub partner: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub remit_type: Option<String>,
}

impl ListQuery {
    pub fn search_term(&self) -> String {
        self.search_term.as_deref().unwrap_or_default().trim().to_string()
    }
}

/// Fields every page layout needs.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub csrf_token: String,
    pub staff_email: String,
}

impl From<&StaffContext> for Layout {
    fn from(staff: &StaffContext) -> Self {
        Self {
            csrf_token: staff.csrf_token.clone(),
            staff_email: staff.email.clone(),
        }
    }
}

/// One entry of the partner picker shown on configuration pages.
#[derive(Debug, Clone, Serialize)]
pub struct PartnerOption {
    pub code: &'static str,
    pub name: &'static str,
    pub required_params: &'static [&'static str],
}

pub fn partner_catalog() -> Vec<PartnerOption> {
    PartnerType::ALL
        .into_iter()
        .map(|partner| PartnerOption {
            code: partner.code(),
            name: partner.name(),
            required_params: partner.required_params(),
        })
        .collect()
}

/// Parse a UUID path parameter.
pub fn parse_id(raw: &str, name: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidPath(name))
}

/// Parse an optional UUID query parameter, ignoring malformed values.
pub fn parse_optional_id(raw: Option<&str>, name: &'static str) -> Option<Uuid> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!(parameter = name, value = raw, error = %e, "ignoring malformed id");
            None
        }
    }
}

/// Parse the `{apienv}` path segment.
pub fn parse_env(raw: &str) -> Result<ApiEnv, AppError> {
    ApiEnv::parse(raw).ok_or(AppError::InvalidPath("apienv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_and_envs() {
        assert!(parse_id("5f0c1f2e-8a51-4d61-9c0e-0b1d2a3c4e5f", "id").is_ok());
        assert!(matches!(parse_id("42", "id"), Err(AppError::InvalidPath("id"))));
        assert_eq!(parse_optional_id(Some("junk"), "org_id"), None);
        assert_eq!(parse_optional_id(None, "org_id"), None);
        assert_eq!(parse_env("LIVE").unwrap(), ApiEnv::Live);
        assert!(parse_env("staging").is_err());
    }
}
