//! OAuth2 client handlers.
//!
//! - GET /dashboard/oauth2-clients?org_id= - List clients
//! - POST /dashboard/oauth2-clients - Register a client
//! - POST /dashboard/oauth2-clients/{id}/disable - Disable a client

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, api_client::parse_oauth_client},
    handlers::{Layout, ListQuery, parse_optional_id},
    middleware::auth::StaffContext,
    models::user::{CreateOAuthClientRequest, IssuedCredential, OAUTH_SCOPES, OAuthClient},
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

const LIST_TEMPLATE: &str = "oauth2-client-list.html";
const ISSUED_TEMPLATE: &str = "oauth2-client-issued.html";
const LIST_PATH: &str = "/dashboard/oauth2-clients";

#[derive(Debug, Serialize)]
struct OAuthListView {
    #[serde(flatten)]
    layout: Layout,
    org_id: Option<Uuid>,
    clients: Vec<OAuthClient>,
    scopes: &'static [&'static str],
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_list(
    server: &Server,
    staff: &StaffContext,
    org_id: Option<Uuid>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let clients = match org_id {
        Some(org_id) => tolerate(server.rbac.list_oauth_clients(org_id).await, "oauth2 clients"),
        None => Vec::new(),
    };

    let view = OAuthListView {
        layout: Layout::from(staff),
        org_id,
        clients,
        scopes: OAUTH_SCOPES,
        errors,
        form,
    };

    server.render(LIST_TEMPLATE, &view)
}

/// List OAuth2 clients, narrowed to `org_id` when it parses as an id.
pub async fn list_oauth_clients(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_optional_id(query.org_id.as_deref(), "org_id");
    render_list(&server, &staff, org_id, FieldErrors::default(), BTreeMap::new()).await
}

#[derive(Debug, Serialize)]
struct IssuedView {
    #[serde(flatten)]
    layout: Layout,
    org_id: Uuid,
    name: String,
    redirect_uris: Vec<String>,
    scopes: Vec<String>,
    credential: IssuedCredential,
}

/// Register an OAuth2 client.
///
/// # Form Fields
///
/// - `org_id`, `name` - required
/// - `redirect_uris` - repeated or newline separated, at least one
/// - `scopes` - repeated, each from the allowed set
pub async fn create_oauth_client(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let fields = FormFields::from(pairs);

    let form = match parse_oauth_client(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let org_id = parse_optional_id(fields.get("org_id"), "org_id");
            let page = render_list(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    let credential = server
        .rbac
        .create_oauth_client(CreateOAuthClientRequest {
            org_id: form.org_id,
            name: form.name.clone(),
            redirect_uris: form.redirect_uris.clone(),
            scopes: form.scopes.clone(),
            created_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(client_id = %credential.client_id, org_id = %form.org_id, staff = %staff.user_id, "oauth2 client registered");

    let view = IssuedView {
        layout: Layout::from(&staff),
        org_id: form.org_id,
        name: form.name,
        redirect_uris: form.redirect_uris,
        scopes: form.scopes,
        credential,
    };

    Ok(server.render(ISSUED_TEMPLATE, &view)?.into_response())
}

/// Disable an OAuth2 client.
///
/// # Form Fields
///
/// - `org_id` - optional; when present the redirect keeps the list filtered
pub async fn disable_oauth_client(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let client_id = id.trim();
    if client_id.is_empty() {
        return Err(AppError::InvalidPath("id"));
    }
    let fields = FormFields::from(pairs);

    server.rbac.disable_oauth_client(client_id).await?;
    tracing::info!(client_id, staff = %staff.user_id, "oauth2 client disabled");

    let target = match parse_optional_id(fields.get("org_id"), "org_id") {
        Some(org_id) => format!("{LIST_PATH}?org_id={org_id}"),
        None => LIST_PATH.to_string(),
    };
    Ok(Redirect::to(&target))
}
