//! Transaction history handlers.
//!
//! This module serves read-only history views, each backed by the sandbox
//! or live transaction service selected by the `{apienv}` path segment:
//! - GET /dashboard/transactions/{apienv}/remittance - Remittance history
//! - GET /dashboard/transactions/{apienv}/remittance/{id} - Remittance detail
//! - GET /dashboard/transactions/{apienv}/cico - Cash-in/cash-out history
//! - GET /dashboard/transactions/{apienv}/micro-insurance - Micro-insurance history

use crate::{
    error::AppError,
    handlers::{Layout, ListQuery, parse_env, parse_optional_id},
    middleware::auth::StaffContext,
    models::{
        filters::{PARTNER, parse_filter_list, parse_sort},
        money::format_hundredths,
        pagination::{PageRequest, Pagination, filter_query},
        transaction::{CicoTransaction, MicroInsuranceTransaction, Remittance, TransactionListRequest},
        user::ApiEnv,
    },
    services::tolerate,
    state::Server,
};
use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::NaiveDate;
use serde::Serialize;

const REMITTANCE_LIST_TEMPLATE: &str = "transactions-remittance.html";
const REMITTANCE_DETAIL_TEMPLATE: &str = "transactions-remittance-detail.html";
const CICO_TEMPLATE: &str = "transactions-cico.html";
const MICRO_INSURANCE_TEMPLATE: &str = "transactions-micro-insurance.html";

fn parse_date(raw: Option<&str>, name: &'static str) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(parameter = name, value = raw, error = %e, "ignoring malformed date");
            None
        }
    }
}

/// Decoded history filters plus the query string that reproduces them.
struct HistoryFilter {
    page: PageRequest,
    request: TransactionListRequest,
    search_term: String,
    query: String,
}

fn history_filter(query: &ListQuery, per_page: u32) -> HistoryFilter {
    let page = PageRequest::from_query(query.page.as_deref(), per_page);
    let search_term = query.search_term();
    let from_date = parse_date(query.start_date.as_deref(), "start_date");
    let until_date = parse_date(query.end_date.as_deref(), "end_date");

    let request = TransactionListRequest {
        org_id: parse_optional_id(query.org_id.as_deref(), "org_id"),
        limit: page.limit,
        offset: page.offset,
        sort_by: parse_sort(query.sort.as_deref()),
        search_term: search_term.clone(),
        partners: parse_filter_list(query.partner.as_deref(), PARTNER),
        from_date,
        until_date,
    };

    let org_id = request.org_id.map(|id| id.to_string()).unwrap_or_default();
    let start = from_date.map(|d| d.to_string()).unwrap_or_default();
    let end = until_date.map(|d| d.to_string()).unwrap_or_default();
    let query = filter_query(&[
        ("search-term", search_term.as_str()),
        ("org_id", org_id.as_str()),
        ("partner", query.partner.as_deref().unwrap_or_default()),
        ("start_date", start.as_str()),
        ("end_date", end.as_str()),
        ("sort", query.sort.as_deref().unwrap_or_default()),
    ]);

    HistoryFilter {
        page,
        request,
        search_term,
        query,
    }
}

#[derive(Debug, Serialize)]
struct RemittanceRow {
    #[serde(flatten)]
    remittance: Remittance,
    partner_name: &'static str,
    amount: String,
    charge: String,
}

impl From<Remittance> for RemittanceRow {
    fn from(remittance: Remittance) -> Self {
        Self {
            partner_name: remittance.partner.name(),
            amount: format_hundredths(remittance.amount_cents),
            charge: format_hundredths(remittance.charge_cents),
            remittance,
        }
    }
}

#[derive(Debug, Serialize)]
struct HistoryView<T> {
    #[serde(flatten)]
    layout: Layout,
    env: ApiEnv,
    rows: Vec<T>,
    pagination: Pagination,
    search_term: String,
}

/// Remittance history.
///
/// # Query Parameters
///
/// - `page`, `sort`
/// - `search-term` - control number
/// - `partner` - comma-separated partner names
/// - `start_date`, `end_date` - `YYYY-MM-DD`
/// - `org_id` - restrict to one organization
pub async fn remittance_history(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(apienv): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let env = parse_env(&apienv)?;
    let filter = history_filter(&query, server.settings.per_page);

    let list = tolerate(
        server.transactions(env).list_remittances(filter.request).await,
        "remittance history",
    );

    let view = HistoryView {
        layout: Layout::from(&staff),
        env,
        rows: list.remittances.into_iter().map(RemittanceRow::from).collect(),
        pagination: Pagination::new(filter.page, list.total, filter.query),
        search_term: filter.search_term,
    };

    server.render(REMITTANCE_LIST_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct RemittanceDetailView {
    #[serde(flatten)]
    layout: Layout,
    env: ApiEnv,
    remittance: RemittanceRow,
}

/// Show one remittance from the `{apienv}` history.
///
/// Unlike the lists, a failed lookup leaves the page for the error path.
pub async fn remittance_detail(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path((apienv, id)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let env = parse_env(&apienv)?;
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::InvalidPath("id"));
    }

    let remittance = server.transactions(env).get_remittance(id).await?;

    let view = RemittanceDetailView {
        layout: Layout::from(&staff),
        env,
        remittance: remittance.into(),
    };

    server.render(REMITTANCE_DETAIL_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct CicoRow {
    #[serde(flatten)]
    transaction: CicoTransaction,
    amount: String,
    charge: String,
}

/// Cash-in/cash-out history for one environment.
///
/// Takes the same query parameters as [`remittance_history`].
pub async fn cico_history(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(apienv): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let env = parse_env(&apienv)?;
    let filter = history_filter(&query, server.settings.per_page);

    let list = tolerate(server.transactions(env).list_cico(filter.request).await, "cico history");

    let rows = list
        .transactions
        .into_iter()
        .map(|transaction| CicoRow {
            amount: format_hundredths(transaction.amount_cents),
            charge: format_hundredths(transaction.charge_cents),
            transaction,
        })
        .collect();

    let view = HistoryView {
        layout: Layout::from(&staff),
        env,
        rows,
        pagination: Pagination::new(filter.page, list.total, filter.query),
        search_term: filter.search_term,
    };

    server.render(CICO_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct MicroInsuranceRow {
    #[serde(flatten)]
    transaction: MicroInsuranceTransaction,
    premium: String,
}

/// Micro-insurance history for one environment.
///
/// Takes the same query parameters as [`remittance_history`]. Premiums are
/// shown in the same two-decimal format as remittance amounts.
pub async fn micro_insurance_history(
    State(server): State<Server>,
    Extension(staff): Extension<StaffContext>,
    Path(apienv): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let env = parse_env(&apienv)?;
    let filter = history_filter(&query, server.settings.per_page);

    let list = tolerate(
        server.transactions(env).list_micro_insurance(filter.request).await,
        "micro-insurance history",
    );

    let rows = list
        .transactions
        .into_iter()
        .map(|transaction| MicroInsuranceRow {
            premium: format_hundredths(transaction.premium_cents),
            transaction,
        })
        .collect();

    let view = HistoryView {
        layout: Layout::from(&staff),
        env,
        rows,
        pagination: Pagination::new(filter.page, list.total, filter.query),
        search_term: filter.search_term,
    };

    server.render(MICRO_INSURANCE_TEMPLATE, &view)
}
