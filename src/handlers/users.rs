//! User handlers.
//!
//! - GET /dashboard/users - Paginated user list
//! - GET /dashboard/users/{id} - User detail

use crate::{
    error::AppError,
    handlers::{Layout, ListQuery, parse_optional_id},
    middleware::auth::StaffContext,
    models::{
        filters::{INVITE_STATUS, parse_filter_list, parse_sort, parse_sort_column},
        org::OrgProfile,
        pagination::{PageRequest, Pagination, filter_query},
        user::{ListUsersRequest, User},
    },
    services::tolerate,
    state::Server,
};
use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Html,
};
use serde::Serialize;

const LIST_TEMPLATE: &str = "user-list.html";
const DETAIL_TEMPLATE: &str = "user-detail.html";
const SORT_COLUMNS: &[&str] = &["name", "email", "created"];

#[derive(Debug, Serialize)]
struct UserListView {
    #[serde(flatten)]
    layout: Layout,
    users: Vec<UserView>,
    pagination: Pagination,
    search_term: String,
    invite_status: String,
}

#[derive(Debug, Serialize)]
struct UserView {
    #[serde(flatten)]
    user: User,
    full_name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            user,
        }
    }
}

/// List users across organizations, optionally narrowed to one `org_id`.
pub async fn list_users(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = PageRequest::from_query(query.page.as_deref(), server.settings.per_page);
    let search_term = query.search_term();
    let org_id = parse_optional_id(query.org_id.as_deref(), "org_id");
    let sort_column = parse_sort_column(query.sort_column.as_deref(), SORT_COLUMNS, "created");

    let list = tolerate(
        server
            .rbac
            .list_users(ListUsersRequest {
                org_id,
                limit: page.limit,
                offset: page.offset,
                sort_by: parse_sort(query.sort.as_deref()),
                sort_column: sort_column.to_string(),
                search_term: search_term.clone(),
                invite_statuses: parse_filter_list(query.invite_status.as_deref(), INVITE_STATUS),
            })
            .await,
        "user list",
    );

    let invite_status = query.invite_status.unwrap_or_default();
    let org_filter = org_id.map(|id| id.to_string()).unwrap_or_default();
    let filters = filter_query(&[
        ("search-term", search_term.as_str()),
        ("invite_status", invite_status.as_str()),
        ("org_id", org_filter.as_str()),
    ]);

    let view = UserListView {
        layout: Layout::from(&staff),
        users: list.users.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page, list.total, filters),
        search_term,
        invite_status,
    };

    server.render(LIST_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct UserDetailView {
    #[serde(flatten)]
    layout: Layout,
    user: UserView,
    organization: Option<OrgProfile>,
}

/// Show a user. The organization card is decorative.
pub async fn user_detail(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidPath("id"));
    }

    let user = server.rbac.get_user(id).await?;

    let organization = match user.org_id {
        Some(org_id) => match server.profile.get_org_profile(org_id).await {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, %org_id, "user organization unavailable");
                None
            }
        },
        None => None,
    };

    let view = UserDetailView {
        layout: Layout::from(&staff),
        user: user.into(),
        organization,
    };

    server.render(DETAIL_TEMPLATE, &view)
}
