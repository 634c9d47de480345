//! Branch (location) handlers.
//!
//! - GET /dashboard/location/{id} - Paginated branch list
//! - POST /dashboard/location/{id} - Add a branch
//! - POST /dashboard/location/{id}/{branch_id}/delete - Remove a branch

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, branch::parse_branch},
    handlers::{Layout, ListQuery, parse_id},
    middleware::auth::StaffContext,
    models::{
        branch::{Branch, ListBranchesRequest},
        org::OrgProfile,
        pagination::{PageRequest, Pagination},
    },
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

const TEMPLATE: &str = "location.html";

#[derive(Debug, Serialize)]
struct BranchListView {
    #[serde(flatten)]
    layout: Layout,
    profile: OrgProfile,
    branches: Vec<Branch>,
    pagination: Pagination,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_page(
    server: &Server,
    staff: &StaffContext,
    org_id: Uuid,
    page: Option<&str>,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let page = PageRequest::from_query(page, server.settings.per_page);
    let profile = server.profile.get_org_profile(org_id).await?;
    let list = tolerate(
        server
            .profile
            .list_branches(ListBranchesRequest {
                org_id,
                limit: page.limit,
                offset: page.offset,
            })
            .await,
        "branches",
    );

    let view = BranchListView {
        layout: Layout::from(staff),
        profile,
        branches: list.branches,
        pagination: Pagination::new(page, list.total, String::new()),
        errors,
        form,
    };

    server.render(TEMPLATE, &view)
}

fn list_path(org_id: Uuid) -> String {
    format!("/dashboard/location/{org_id}")
}

/// List an organization's branches, one page at a time.
///
/// # Query Parameters
///
/// - `page` - 1-based page; malformed values fall back to page 1
pub async fn list_branches(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let org_id = parse_id(&id, "id")?;
    render_page(&server, &staff, org_id, query.page.as_deref(), FieldErrors::default(), BTreeMap::new()).await
}

/// Add a branch.
///
/// # Form Fields
///
/// - `name`, `address`, `city`, `province` - required
/// - `zip` - four digits
/// - `phone` - 7 to 13 digits, separators ignored
pub async fn create_branch(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let org_id = parse_id(&id, "id")?;
    let fields = FormFields::from(pairs);

    let form = match parse_branch(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_page(&server, &staff, org_id, None, errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    let branch_id = server
        .profile
        .create_branch(Branch {
            id: String::new(),
            org_id,
            name: form.name,
            address: form.address,
            city: form.city,
            province: form.province,
            zip: form.zip,
            phone: form.phone,
            created: None,
        })
        .await?;

    tracing::info!(%org_id, branch_id, staff = %staff.user_id, "branch created");

    Ok(Redirect::to(&list_path(org_id)).into_response())
}

/// Delete one branch and return to the organization's branch list.
pub async fn delete_branch(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path((id, branch_id)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let org_id = parse_id(&id, "id")?;
    let branch_id = branch_id.trim();
    if branch_id.is_empty() {
        return Err(AppError::InvalidPath("branch_id"));
    }

    server.profile.delete_branch(org_id, branch_id).await?;
    tracing::info!(%org_id, branch_id, staff = %staff.user_id, "branch deleted");

    Ok(Redirect::to(&list_path(org_id)))
}
