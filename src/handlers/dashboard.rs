//! DSA applicant review handlers.
//!
//! - GET /dashboard/dsa-applicant-list - Filterable applicant list
//! - GET /dashboard/dsa-applicant/{id} - Applicant detail
//! - POST /dashboard/dsa-applicant/{id}/status - Review decision
//! - POST /dashboard/dsa-applicant/{id}/dsa-code - DSA code assignment

use crate::{
    error::AppError,
    forms::{
        FieldErrors, FormFields,
        dsa::{parse_dsa_code, parse_status},
    },
    handlers::{Layout, ListQuery, parse_id},
    middleware::auth::StaffContext,
    models::{
        files::{DocumentStatus, all_docs_submitted, document_checklist},
        filters::{ORG_STATUS, RISK_SCORE, parse_filter_list, parse_sort, parse_sort_column},
        org::{
            ListOrgProfilesRequest, OrgProfile, RiskScore, TransactionTypes, UpdateDsaCodeRequest,
            UpdateOrgStatusRequest, check_trn_type_for_dsa_code,
        },
        pagination::{PageRequest, Pagination, filter_query},
        partner::PartnerConfig,
        user::{InviteStatus, ListUsersRequest, User},
    },
    services::tolerate,
    state::Server,
};
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const LIST_TEMPLATE: &str = "dsa-applicant-list.html";
const DETAIL_TEMPLATE: &str = "dsa-applicant-detail.html";
const SORT_COLUMNS: &[&str] = &["company_name", "created", "updated", "status"];

/// Users shown on the applicant detail page.
const DETAIL_USER_LIMIT: u32 = 50;

#[derive(Debug, Serialize)]
struct ApplicantRow {
    id: Uuid,
    company_name: String,
    contact_person: String,
    contact_email: String,
    status_text: &'static str,
    risk_score: RiskScore,
    transaction_types: TransactionTypes,
    dsa_code: String,
    created: Option<DateTime<Utc>>,
}

impl From<OrgProfile> for ApplicantRow {
    fn from(profile: OrgProfile) -> Self {
        Self {
            id: profile.id,
            transaction_types: check_trn_type_for_dsa_code(&profile.transaction_types),
            status_text: profile.status.display_status(),
            company_name: profile.business_info.company_name,
            contact_person: profile.business_info.contact_person,
            contact_email: profile.business_info.contact_email,
            risk_score: profile.risk_score,
            dsa_code: profile.dsa_code,
            created: profile.created,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApplicantListView {
    #[serde(flatten)]
    layout: Layout,
    applicants: Vec<ApplicantRow>,
    pagination: Pagination,
    search_term: String,
    status: String,
    risk_score: String,
    sort: String,
    sort_column: &'static str,
}

/// List applicant organizations.
///
/// # Query Parameters
///
/// - `page` - 1-based page number
/// - `search-term` - company name filter
/// - `status` - comma-separated statuses, e.g. `accepted,pending`
/// - `risk_score` - comma-separated risk scores
/// - `sort`, `sort_column` - ordering
///
/// A failing list call renders an empty list rather than leaving the page.
pub async fn list_applicants(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = PageRequest::from_query(query.page.as_deref(), server.settings.per_page);
    let search_term = query.search_term();
    let sort_column = parse_sort_column(query.sort_column.as_deref(), SORT_COLUMNS, "created");

    let request = ListOrgProfilesRequest {
        limit: page.limit,
        offset: page.offset,
        sort_by: parse_sort(query.sort.as_deref()),
        sort_column: sort_column.to_string(),
        company_name: search_term.clone(),
        statuses: parse_filter_list(query.status.as_deref(), ORG_STATUS),
        risk_scores: parse_filter_list(query.risk_score.as_deref(), RISK_SCORE),
    };

    let list = tolerate(server.profile.list_org_profiles(request).await, "applicant list");

    let status = query.status.unwrap_or_default();
    let risk_score = query.risk_score.unwrap_or_default();
    let sort = query.sort.unwrap_or_default();
    let filters = filter_query(&[
        ("search-term", search_term.as_str()),
        ("status", status.as_str()),
        ("risk_score", risk_score.as_str()),
        ("sort", sort.as_str()),
        ("sort_column", sort_column),
    ]);

    let view = ApplicantListView {
        layout: Layout::from(&staff),
        applicants: list.profiles.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page, list.total, filters),
        search_term,
        status,
        risk_score,
        sort,
        sort_column,
    };

    server.render(LIST_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    invite_status: InviteStatus,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            name: user.full_name(),
            id: user.id,
            email: user.email,
            invite_status: user.invite_status,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApplicantDetailView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    status_text: &'static str,
    transaction_types: TransactionTypes,
    documents: Vec<DocumentStatus>,
    all_docs_submitted: bool,
    partners: Vec<PartnerConfig>,
    users: Vec<UserRow>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

/// Assemble the detail page.
///
/// The profile is the page's primary data and aborts the request on
/// failure. Uploads, partners and users only decorate it.
async fn load_detail(
    server: &Server,
    staff: &StaffContext,
    org_id: Uuid,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<ApplicantDetailView, AppError> {
    let profile = server.profile.get_org_profile(org_id).await?;
    let uploads = tolerate(server.profile.list_file_uploads(org_id).await, "file uploads");
    let partners = tolerate(server.profile.list_partners(org_id).await, "partners");
    let users = tolerate(
        server
            .rbac
            .list_users(ListUsersRequest {
                org_id: Some(org_id),
                limit: DETAIL_USER_LIMIT,
                ..Default::default()
            })
            .await,
        "organization users",
    );

    Ok(ApplicantDetailView {
        layout: Layout::from(staff),
        status_text: profile.status.display_status(),
        transaction_types: check_trn_type_for_dsa_code(&profile.transaction_types),
        documents: document_checklist(&uploads),
        all_docs_submitted: all_docs_submitted(&uploads),
        profile,
        partners,
        users: users.users.into_iter().map(Into::into).collect(),
        errors,
        form,
    })
}

/// Show one applicant with documents, partners and users.
pub async fn applicant_detail(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    let view = load_detail(&server, &staff, org_id, FieldErrors::default(), BTreeMap::new()).await?;
    server.render(DETAIL_TEMPLATE, &view)
}

fn detail_path(org_id: Uuid) -> String {
    format!("/dashboard/dsa-applicant/{org_id}")
}

/// Record a review decision.
///
/// # Form Fields
///
/// - `status` - accepted, rejected, pending-documents, ...
/// - `remark` - required for rejections
pub async fn update_status(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_status(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let view = load_detail(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(server.render(DETAIL_TEMPLATE, &view)?.into_response());
        }
    };

    server
        .profile
        .update_org_status(UpdateOrgStatusRequest {
            org_id,
            status: form.status,
            remark: form.remark,
            updated_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(%org_id, status = form.status.as_str(), staff = %staff.user_id, "applicant status updated");

    Ok(Redirect::to(&detail_path(org_id)).into_response())
}

/// Assign a DSA code and terminal ids.
///
/// # Form Fields
///
/// - `dsa_code` - alphanumeric, at most 20 characters
/// - `TransactionOTC`, `TransactionDIGITAL` - channel checkboxes
/// - `terminal_id_otc`, `terminal_id_digital` - required per selected channel
pub async fn update_dsa_code(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_dsa_code(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let view = load_detail(&server, &staff, org_id, errors, fields.echo()).await?;
            return Ok(server.render(DETAIL_TEMPLATE, &view)?.into_response());
        }
    };

    server
        .profile
        .update_dsa_code(UpdateDsaCodeRequest {
            org_id,
            dsa_code: form.dsa_code,
            transaction_types: form.transaction_types.to_tags(),
            terminal_id_otc: form.terminal_id_otc,
            terminal_id_digital: form.terminal_id_digital,
            updated_by: staff.user_id.clone(),
        })
        .await?;

    Ok(Redirect::to(&detail_path(org_id)).into_response())
}
