//! Service enrollment request handlers.
//!
//! - GET /dashboard/service-requests - Filterable request list
//! - POST /dashboard/service-requests/{id}/{service}/status - Accept or reject

use crate::{
    error::AppError,
    forms::FormFields,
    handlers::{Layout, ListQuery, parse_id},
    middleware::auth::StaffContext,
    models::{
        filters::{SERVICE_REQUEST_STATUS, SERVICE_TYPE, lookup, parse_filter_list, parse_sort},
        pagination::{PageRequest, Pagination, filter_query},
        partner::{ListServiceRequestsRequest, ServiceRequest, ServiceRequestStatus},
    },
    services::tolerate,
    state::Server,
};
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Serialize;

const LIST_TEMPLATE: &str = "service-request-list.html";
const LIST_PATH: &str = "/dashboard/service-requests";

#[derive(Debug, Serialize)]
struct RequestRow {
    #[serde(flatten)]
    request: ServiceRequest,
    service_slug: &'static str,
    partner_names: Vec<&'static str>,
}

impl From<ServiceRequest> for RequestRow {
    fn from(request: ServiceRequest) -> Self {
        Self {
            service_slug: request.service.slug(),
            partner_names: request.partners.iter().map(|p| p.name()).collect(),
            request,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestListView {
    #[serde(flatten)]
    layout: Layout,
    requests: Vec<RequestRow>,
    pagination: Pagination,
    search_term: String,
    status: String,
    services: String,
}

/// List service requests.
///
/// # Query Parameters
///
/// - `page`, `search-term`, `sort`
/// - `status` - comma-separated pending, accepted, rejected
/// - `services` - comma-separated service slugs
pub async fn list_service_requests(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let page = PageRequest::from_query(query.page.as_deref(), server.settings.per_page);
    let search_term = query.search_term();

    let list = tolerate(
        server
            .profile
            .list_service_requests(ListServiceRequestsRequest {
                limit: page.limit,
                offset: page.offset,
                sort_by: parse_sort(query.sort.as_deref()),
                company_name: search_term.clone(),
                statuses: parse_filter_list(query.status.as_deref(), SERVICE_REQUEST_STATUS),
                services: parse_filter_list(query.services.as_deref(), SERVICE_TYPE),
            })
            .await,
        "service requests",
    );

    let status = query.status.unwrap_or_default();
    let services = query.services.unwrap_or_default();
    let filters = filter_query(&[
        ("search-term", search_term.as_str()),
        ("status", status.as_str()),
        ("services", services.as_str()),
    ]);

    let view = RequestListView {
        layout: Layout::from(&staff),
        requests: list.requests.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(page, list.total, filters),
        search_term,
        status,
        services,
    };

    server.render(LIST_TEMPLATE, &view)
}

/// Accept or reject an organization's request for a service.
///
/// # Form Fields
///
/// - `status` - `accepted` or `rejected`
pub async fn set_service_request_status(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path((id, service)): Path<(String, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let org_id = parse_id(&id, "id")?;
    let service = lookup(SERVICE_TYPE, &service).ok_or(AppError::InvalidPath("service"))?;
    let fields = FormFields::from(pairs);

    let status = match fields.get("status").and_then(|raw| lookup(SERVICE_REQUEST_STATUS, raw)) {
        Some(status @ (ServiceRequestStatus::Accepted | ServiceRequestStatus::Rejected)) => status,
        _ => return Err(AppError::InvalidRequest("status must be accepted or rejected".into())),
    };

    server
        .profile
        .set_service_request_status(org_id, service, status, &staff.user_id)
        .await?;

    tracing::info!(%org_id, service = service.slug(), ?status, staff = %staff.user_id, "service request decided");

    Ok(Redirect::to(LIST_PATH))
}
