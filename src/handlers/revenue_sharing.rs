//! Revenue-sharing handlers.
//!
//! # Endpoints
//!
//! - GET /dashboard/revenue-sharing-mgt/{id}?remit_type= - Rules for one partner
//! - POST /dashboard/revenue-sharing-mgt/{id} - Save one bound's rules of a partner
//!
//! The page has one form per bound. A save posts both channels of that
//! bound at once. Channels whose marker checkbox is unticked are deleted;
//! the rest are upserted, with tiered rules getting their tier ladder
//! replaced afterwards.

use crate::{
    error::AppError,
    forms::{
        FieldErrors, FormFields,
        revenue::{RuleAction, field_name, parse_revenue_sharing},
    },
    handlers::{Layout, ListQuery, PartnerOption, parse_id, partner_catalog},
    middleware::auth::StaffContext,
    models::{
        money::format_hundredths,
        org::OrgProfile,
        partner::PartnerType,
        revenue::{BoundType, RevenueSharingKey, RevenueSharingRule, TierType, TransactionChannel},
    },
    services::{ServiceError, tolerate},
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

const TEMPLATE: &str = "revenue-sharing-mgt.html";

/// Partner shown when `remit_type` is absent or unknown.
const DEFAULT_PARTNER: PartnerType = PartnerType::WesternUnion;

#[derive(Debug, Serialize)]
struct TierRow {
    min: String,
    max: String,
    amount: String,
}

/// One channel section inside a bound's form.
#[derive(Debug, Serialize)]
struct RuleSection {
    channel: TransactionChannel,
    /// Channel tag every field name of the section ends with
    tag: &'static str,
    /// Field name of the section's marker checkbox
    marker: String,
    configured: bool,
    tier_type: TierType,
    percentage: String,
    tiers: Vec<TierRow>,
}

/// One form on the page, posted with its `bound_type`.
#[derive(Debug, Serialize)]
struct BoundForm {
    bound: BoundType,
    bound_type: &'static str,
    sections: Vec<RuleSection>,
}

fn rule_section(rules: &[RevenueSharingRule], bound: BoundType, channel: TransactionChannel) -> RuleSection {
    let rule = rules
        .iter()
        .find(|rule| rule.key.bound == bound && rule.key.channel == channel);
    RuleSection {
        channel,
        tag: channel.form_tag(),
        marker: field_name("Transaction", channel),
        configured: rule.is_some(),
        tier_type: rule.map(|r| r.tier_type).unwrap_or_default(),
        percentage: rule.map(|r| format_hundredths(r.percentage_hundredths)).unwrap_or_default(),
        tiers: rule
            .map(|r| {
                r.tiers
                    .iter()
                    .map(|tier| TierRow {
                        min: format_hundredths(tier.min_cents),
                        max: format_hundredths(tier.max_cents),
                        amount: format_hundredths(tier.amount_hundredths),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn bound_forms(rules: &[RevenueSharingRule]) -> Vec<BoundForm> {
    BoundType::ALL
        .iter()
        .map(|&bound| BoundForm {
            bound,
            bound_type: bound.form_value(),
            sections: TransactionChannel::ALL
                .iter()
                .map(|&channel| rule_section(rules, bound, channel))
                .collect(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct RevenueSharingView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    partners: Vec<PartnerOption>,
    remit_type: &'static str,
    bounds: Vec<BoundForm>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_page(
    server: &Server,
    staff: &StaffContext,
    org_id: Uuid,
    partner: PartnerType,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let profile = server.profile.get_org_profile(org_id).await?;
    let rules = tolerate(
        server.profile.list_revenue_sharing(org_id, partner).await,
        "revenue sharing rules",
    );

    let view = RevenueSharingView {
        layout: Layout::from(staff),
        profile,
        partners: partner_catalog(),
        remit_type: partner.code(),
        bounds: bound_forms(&rules),
        errors,
        form,
    };

    server.render(TEMPLATE, &view)
}

fn selected_partner(raw: Option<&str>) -> PartnerType {
    raw.and_then(PartnerType::from_code).unwrap_or(DEFAULT_PARTNER)
}

/// Revenue-sharing page for one partner, picked by `remit_type`.
///
/// An absent or unknown `remit_type` shows Western Union.
pub async fn revenue_sharing(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    let partner = selected_partner(query.remit_type.as_deref());
    render_page(&server, &staff, org_id, partner, FieldErrors::default(), BTreeMap::new()).await
}

/// Apply one combination's change.
///
/// Deleting a rule that was never configured is not an error.
pub async fn upsert_or_delete_rule(
    server: &Server,
    key: RevenueSharingKey,
    action: RuleAction,
    updated_by: &str,
) -> Result<(), ServiceError> {
    match action {
        RuleAction::Delete => match server.profile.delete_revenue_sharing(key).await {
            Ok(()) | Err(ServiceError::NotFound) => Ok(()),
            Err(e) => Err(e),
        },
        RuleAction::Upsert {
            tier_type,
            percentage_hundredths,
            tiers,
        } => {
            let rule = RevenueSharingRule {
                id: String::new(),
                key,
                tier_type,
                percentage_hundredths,
                tiers: Vec::new(),
                updated_by: updated_by.to_string(),
            };
            let rule_id = server.profile.upsert_revenue_sharing(rule).await?;
            if tier_type == TierType::Tiered {
                server.profile.upsert_revenue_sharing_tiers(&rule_id, tiers).await?;
            }
            Ok(())
        }
    }
}

/// Save both channel rules of one partner for the posted bound.
///
/// # Arguments
///
/// * `id` - Organization id from the path
/// * `pairs` - Raw form fields; see [`crate::forms::revenue`] for the names
///
/// # Returns
///
/// * `303` back to the page for the saved partner
/// * `200` with the page re-rendered when any field is invalid
///
/// Both channels are validated before the first backend call, so a rejected
/// form leaves the stored rules untouched.
pub async fn save_revenue_sharing(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    // Step 1: Validate both channels
    let form = match parse_revenue_sharing(&fields, server.settings.max_form_rows) {
        Ok(form) => form,
        Err(errors) => {
            let partner = selected_partner(fields.get("remit_type"));
            let page = render_page(&server, &staff, org_id, partner, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    // Step 2: One upsert or delete per channel
    for change in form.changes {
        let key = RevenueSharingKey {
            org_id,
            partner: form.partner,
            bound: form.bound,
            channel: change.channel,
        };
        upsert_or_delete_rule(&server, key, change.action, &staff.user_id).await?;
    }

    tracing::info!(%org_id, partner = form.partner.code(), bound = form.bound.form_value(), staff = %staff.user_id, "revenue sharing saved");

    let target = format!("/dashboard/revenue-sharing-mgt/{org_id}?remit_type={}", form.partner.code());
    Ok(Redirect::to(&target).into_response())
}
