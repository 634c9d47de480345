//! Currency settings handlers.
//!
//! - GET /dashboard/currency/{id} - Organization currency settings
//! - POST /dashboard/currency/{id} - Save currency settings

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, currency::parse_currency},
    handlers::{Layout, parse_id},
    middleware::auth::StaffContext,
    models::{currency::CurrencyConfig, money::format_hundredths, org::OrgProfile},
    services::tolerate,
    state::Server,
};
use axum::{
    Extension, Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const TEMPLATE: &str = "currency.html";

#[derive(Debug, Serialize)]
struct CurrencyView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    currency: CurrencyConfig,
    markup: String,
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
    // Organizations without settings get an empty form.
    let currency = tolerate(server.profile.get_currency(org_id).await, "currency settings");

    let view = CurrencyView {
        layout: Layout::from(staff),
        profile,
        markup: format_hundredths(currency.markup_hundredths),
        currency,
        errors,
        form,
    };

    server.render(TEMPLATE, &view)
}

/// Currency settings of one organization.
///
/// # Returns
///
/// * `200` with the form prefilled from the stored settings, or empty when
///   none are configured yet
/// * `303` to the error page when the organization cannot be loaded
pub async fn currency_settings(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    render_page(&server, &staff, org_id, FieldErrors::default(), BTreeMap::new()).await
}

/// Save currency settings.
///
/// # Form Fields
///
/// - `currency_code` - ISO 4217 code
/// - `markup` - percentage between 0 and 100 with at most two decimals
/// - `start_date`, `end_date` - effective window, end optional
pub async fn save_currency(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_currency(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_page(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    server
        .profile
        .upsert_currency(CurrencyConfig {
            org_id,
            currency_code: form.currency_code,
            markup_hundredths: form.markup_hundredths,
            start_date: form.start_date,
            end_date: form.end_date,
            updated_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(%org_id, staff = %staff.user_id, "currency settings saved");

    Ok(Redirect::to(&format!("/dashboard/currency/{org_id}")).into_response())
}
