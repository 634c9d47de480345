//! Role handlers.
//!
//! - GET /dashboard/roles - Paginated role list
//! - POST /dashboard/roles - Create role
//! - POST /dashboard/roles/{id}/delete - Delete role

use crate::{
    error::AppError,
    forms::{FieldErrors, FormFields, role::parse_role},
    handlers::{Layout, ListQuery},
    middleware::auth::StaffContext,
    models::{
        pagination::{PageRequest, Pagination, filter_query},
        user::{CreateRoleRequest, ListRolesRequest, Role},
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

const LIST_TEMPLATE: &str = "role-list.html";
const LIST_PATH: &str = "/dashboard/roles";

#[derive(Debug, Serialize)]
struct RoleListView {
    #[serde(flatten)]
    layout: Layout,
    roles: Vec<Role>,
    pagination: Pagination,
    search_term: String,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
}

async fn render_list(
    server: &Server,
    staff: &StaffContext,
    query: &ListQuery,
    errors: FieldErrors,
    form: BTreeMap<String, String>,
) -> Result<Html<String>, AppError> {
    let page = PageRequest::from_query(query.page.as_deref(), server.settings.per_page);
    let search_term = query.search_term();

    let list = tolerate(
        server
            .rbac
            .list_roles(ListRolesRequest {
                limit: page.limit,
                offset: page.offset,
                search_term: search_term.clone(),
            })
            .await,
        "role list",
    );

    let filters = filter_query(&[("search-term", search_term.as_str())]);
    let view = RoleListView {
        layout: Layout::from(staff),
        roles: list.roles,
        pagination: Pagination::new(page, list.total, filters),
        search_term,
        errors,
        form,
    };

    server.render(LIST_TEMPLATE, &view)
}

/// Paginated role list with the create form.
pub async fn list_roles(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    render_list(&server, &staff, &query, FieldErrors::default(), BTreeMap::new()).await
}

/// Create a role.
///
/// # Form Fields
///
/// - `name` - required, at most 64 characters
/// - `description` - optional, at most 255 characters
pub async fn create_role(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let fields = FormFields::from(pairs);

    let form = match parse_role(&fields) {
        Ok(form) => form,
        Err(errors) => {
            let page = render_list(&server, &staff, &ListQuery::default(), errors, fields.echo()).await?;
            return Ok(page.into_response());
        }
    };

    let role_id = server
        .rbac
        .create_role(CreateRoleRequest {
            name: form.name,
            description: form.description,
            created_by: staff.user_id.clone(),
        })
        .await?;

    tracing::info!(role_id, staff = %staff.user_id, "role created");

    Ok(Redirect::to(LIST_PATH).into_response())
}

pub async fn delete_role(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidPath("id"));
    }

    server.rbac.delete_role(id).await?;
    tracing::info!(role_id = id, staff = %staff.user_id, "role deleted");

    Ok(Redirect::to(LIST_PATH))
}
