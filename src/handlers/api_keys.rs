//! API client credential handlers.
//!
//! # Endpoints
//!
//! - GET /api-key/{apienv}?org_id= - List an organization's API clients
//! - POST /api-key/generate/{apienv} - Issue a new client and show its secret once
//! - POST /api-key/{apienv}/{client_id}/disable - Disable a client
//!
//! Live credentials move real money, so issuing one requires the staff
//! member's MFA code to be confirmed by the RBAC service first.

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, api_client::parse_api_client},
    handlers::{Layout, ListQuery, parse_env, parse_optional_id},
    middleware::auth::StaffContext,
    models::user::{ApiClient, ApiEnv, CreateApiClientRequest, IssuedCredential},
    services::tolerate,
    state::Server,
};
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const LIST_TEMPLATE: &str = "api-key-list.html";
const ISSUED_TEMPLATE: &str = "api-key-issued.html";

const MFA_REJECTED: &str = "The code was not accepted, try again";

#[derive(Debug, Serialize)]
struct ApiKeyListView {
    #[serde(flatten)]
    layout: Layout,
    env: ApiEnv,
    org_id: Option<Uuid>,
    clients: Vec<ApiClient>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_list(
    server: &Server,
    staff: &StaffContext,
    env: ApiEnv,
    org_id: Option<Uuid>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let clients = match org_id {
        Some(org_id) => tolerate(server.rbac.list_api_clients(org_id, env).await, "api clients"),
        None => Vec::new(),
    };

    let view = ApiKeyListView {
        layout: Layout::from(staff),
        env,
        org_id,
        clients,
        errors,
        form,
    };

    server.render(LIST_TEMPLATE, &view)
}

fn list_path(env: ApiEnv, org_id: Uuid) -> String {
    format!("/api-key/{}?org_id={org_id}", env.as_str())
}

/// List API clients for `org_id` in one environment.
pub async fn list_api_keys(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(apienv): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let env = parse_env(&apienv)?;
    let org_id = parse_optional_id(query.org_id.as_deref(), "org_id");
    render_list(&server, &staff, env, org_id, FieldErrors::default(), BTreeMap::new()).await
}

#[derive(Debug, Serialize)]
struct IssuedView {
    #[serde(flatten)]
    layout: Layout,
    env: ApiEnv,
    org_id: Uuid,
    name: String,
    credential: IssuedCredential,
}

/// Issue a new API client.
///
/// # Form Fields
///
/// - `org_id` - owning organization
/// - `name` - client label
/// - `mfa_code` - live environment only
///
/// The secret is rendered on the response page and never again.
pub async fn generate_api_key(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(apienv): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let env = parse_env(&apienv)?;
    let fields = FormFields::from(pairs);
    let submitted_org = parse_optional_id(fields.get("org_id"), "org_id");

    let form = match parse_api_client(&fields, env) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_list(&server, &staff, env, submitted_org, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    if let Some(code) = &form.mfa_code {
        if !server.rbac.validate_mfa(&staff.user_id, code).await? {
            tracing::warn!(staff = %staff.user_id, env = env.as_str(), "mfa code rejected");
            let mut errors = FieldErrors::default();
            errors.add("mfa_code", MFA_REJECTED);
            let page = render_list(&server, &staff, env, Some(form.org_id), errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    }

    let credential = server
        .rbac
        .create_api_client(CreateApiClientRequest {
            org_id: form.org_id,
            name: form.name.clone(),
            env,
            created_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(
        client_id = %credential.client_id,
        org_id = %form.org_id,
        env = env.as_str(),
        staff = %staff.user_id,
        "api client issued"
    );

    let view = IssuedView {
        layout: Layout::from(&staff),
        env,
        org_id: form.org_id,
        name: form.name,
        credential,
    };

    Ok(server.render(ISSUED_TEMPLATE, &view)?.into_response())
}

/// Disable an API client and return to its organization's list.
pub async fn disable_api_key(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path((apienv, client_id)): Path<(String, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let env = parse_env(&apienv)?;
    let client_id = client_id.trim();
    if client_id.is_empty() {
        return Err(AppError::InvalidPath("client_id"));
    }
    let fields = FormFields::from(pairs);

    server.rbac.disable_api_client(client_id, env).await?;
    tracing::info!(client_id, env = env.as_str(), staff = %staff.user_id, "api client disabled");

    let target = match parse_optional_id(fields.get("org_id"), "org_id") {
        Some(org_id) => list_path(env, org_id),
        None => format!("/api-key/{}", env.as_str()),
    };
    Ok(Redirect::to(&target))
}
