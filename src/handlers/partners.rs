//! Partner integration handlers.
//!
//! - GET /dashboard/partners/{id} - Configured partners with the catalog
//! - POST /dashboard/partners/{id} - Save a partner configuration
//! - POST /dashboard/partners/{id}/{partner}/status - Enable or disable a partner

use crate::{
    error::AppError,
    forms::{
        FieldErrors, FormFields,
        partner::{parse_partner, parse_partner_status},
    },
    handlers::{Layout, PartnerOption, parse_id, partner_catalog},
    middleware::auth::StaffContext,
    models::{
        org::OrgProfile,
        partner::{PartnerConfig, PartnerStatus, PartnerType},
    },
    services::tolerate,
    state::Server,
};
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const TEMPLATE: &str = "partners.html";

#[derive(Debug, Serialize)]
struct PartnerRow {
    code: &'static str,
    name: &'static str,
    params: BTreeMap<String, String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    status: PartnerStatus,
}

impl From<PartnerConfig> for PartnerRow {
    fn from(config: PartnerConfig) -> Self {
        Self {
            code: config.partner.code(),
            name: config.partner.name(),
            params: config.params,
            start_date: config.start_date,
            end_date: config.end_date,
            status: config.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct PartnerView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    catalog: Vec<PartnerOption>,
    configured: Vec<PartnerRow>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_page(
    server: &Server,
    staff: &StaffContext,
    org_id: Uuid,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let profile = server.profile.get_org_profile(org_id).await?;
    let configs = tolerate(server.profile.list_partners(org_id).await, "partners");

    let view = PartnerView {
        layout: Layout::from(staff),
        profile,
        catalog: partner_catalog(),
        configured: configs.into_iter().map(Into::into).collect(),
        errors,
        form,
    };

    server.render(TEMPLATE, &view)
}

fn partners_path(org_id: Uuid) -> String {
    format!("/dashboard/partners/{org_id}")
}

/// Partner configurations of one organization next to the full catalog.
pub async fn list_partners(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    render_page(&server, &staff, org_id, FieldErrors::default(), BTreeMap::new()).await
}

/// Save a partner configuration.
///
/// # Form Fields
///
/// - `partner` - partner code
/// - `param_{name}` - every parameter the partner requires
/// - `start_date`, `end_date` - activation window, end optional
/// - `enabled` - checkbox
pub async fn save_partner(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_partner(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_page(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    server
        .profile
        .upsert_partner(PartnerConfig {
            org_id,
            partner: form.partner,
            params: form.params,
            start_date: form.start_date,
            end_date: form.end_date,
            status: form.status,
            updated_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(%org_id, partner = form.partner.code(), staff = %staff.user_id, "partner saved");

    Ok(Redirect::to(&partners_path(org_id)).into_response())
}

/// Enable or disable one partner.
///
/// # Form Fields
///
/// - `status` - `enable` or `disable`
pub async fn set_partner_status(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path((id, partner)): Path<(String, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let partner = PartnerType::from_code(&partner).ok_or(AppError::InvalidPath("partner"))?;
    let fields = FormFields::from(pairs);

    let status = match parse_partner_status(&fields) {
        Ok(status) => status,
        Err(errors) => {
            let page = render_page(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    server
        .profile
        .set_partner_status(org_id, partner, status, &staff.user_id)
        .await?;

    tracing::info!(%org_id, partner = partner.code(), ?status, staff = %staff.user_id, "partner status changed");

    Ok(Redirect::to(&partners_path(org_id)).into_response())
}
