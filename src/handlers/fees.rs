//! Fee and commission handlers.
//!
//! - GET /dashboard/fee-management/{id} - Schedules per partner
//! - POST /dashboard/fee-management/{id} - Save a schedule

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, fee::parse_fee},
    handlers::{Layout, PartnerOption, parse_id, partner_catalog},
    middleware::auth::StaffContext,
    models::{
        fees::{FeeKind, FeeSchedule, RateKind},
        money::format_hundredths,
        org::OrgProfile,
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

const TEMPLATE: &str = "fee-management.html";

#[derive(Debug, Serialize)]
struct TierRow {
    min_volume: String,
    max_volume: String,
    rate: String,
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    id: String,
    partner_code: &'static str,
    partner_name: &'static str,
    fee_kind: FeeKind,
    rate_kind: RateKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
    tiers: Vec<TierRow>,
}

impl From<FeeSchedule> for ScheduleRow {
    fn from(schedule: FeeSchedule) -> Self {
        Self {
            id: schedule.id,
            partner_code: schedule.partner.code(),
            partner_name: schedule.partner.name(),
            fee_kind: schedule.fee_kind,
            rate_kind: schedule.rate_kind,
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            tiers: schedule
                .tiers
                .into_iter()
                .map(|tier| TierRow {
                    min_volume: format_hundredths(tier.min_volume_cents),
                    max_volume: format_hundredths(tier.max_volume_cents),
                    rate: format_hundredths(tier.rate_hundredths),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FeeView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    partners: Vec<PartnerOption>,
    /// Schedules grouped by partner code
    schedules: BTreeMap<&'static str, Vec<ScheduleRow>>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

fn group_by_partner(schedules: Vec<FeeSchedule>) -> BTreeMap<&'static str, Vec<ScheduleRow>> {
    let mut grouped: BTreeMap<&'static str, Vec<ScheduleRow>> = BTreeMap::new();
    for schedule in schedules {
        let code = schedule.partner.code();
        grouped.entry(code).or_default().push(schedule.into());
    }
    grouped
}

async fn render_page(
    server: &Server,
    staff: &StaffContext,
    org_id: Uuid,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let profile = server.profile.get_org_profile(org_id).await?;
    let schedules = tolerate(server.profile.list_fees(org_id).await, "fee schedules");

    let view = FeeView {
        layout: Layout::from(staff),
        profile,
        partners: partner_catalog(),
        schedules: group_by_partner(schedules),
        errors,
        form,
    };

    server.render(TEMPLATE, &view)
}

/// Fee and commission schedules of one organization, grouped by partner.
pub async fn fee_management(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    render_page(&server, &staff, org_id, FieldErrors::default(), BTreeMap::new()).await
}

/// Save a fee or commission schedule.
///
/// # Form Fields
///
/// - `partner` - partner code
/// - `fee_kind` - `fee` or `commission`
/// - `rate_kind` - `fixed` or `percentage`
/// - `start_date`, `end_date` - effective window
/// - `tier_count` - number of `MinVolume{i}`, `MaxVolume{i}`, `Rate{i}` rows
pub async fn save_fee(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_fee(&fields, server.settings.max_form_rows) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_page(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    let tier_count = form.tiers.len();
    let schedule_id = server
        .profile
        .upsert_fee(FeeSchedule {
            id: String::new(),
            org_id,
            partner: form.partner,
            fee_kind: form.fee_kind,
            rate_kind: form.rate_kind,
            start_date: form.start_date,
            end_date: form.end_date,
            tiers: form.tiers,
            updated_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(
        %org_id,
        schedule_id,
        partner = form.partner.code(),
        tier_count,
        staff = %staff.user_id,
        "fee schedule saved"
    );

    Ok(Redirect::to(&format!("/dashboard/fee-management/{org_id}")).into_response())
}
