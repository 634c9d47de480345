//! Query-filter vocabularies.
//!
//! Every list view maps free-text filter values onto backend enum values
//! through one of the tables below, so two views filtering on the same
//! field always agree on spelling.

use crate::models::{
    org::{OrgStatus, RiskScore},
    partner::{PartnerType, ServiceRequestStatus, ServiceType},
    user::InviteStatus,
};
use serde::{Deserialize, Serialize};

/// Mapping table from accepted query spellings to an enum value.
pub type FilterTable<T> = &'static [(&'static str, T)];

pub const ORG_STATUS: FilterTable<OrgStatus> = &[
    ("incomplete", OrgStatus::Unknown),
    ("unknown", OrgStatus::Unknown),
    ("pending", OrgStatus::Pending),
    ("pending-documents", OrgStatus::PendingDocuments),
    ("pendingdocuments", OrgStatus::PendingDocuments),
    ("accepted", OrgStatus::Accepted),
    ("completed", OrgStatus::Completed),
    ("rejected", OrgStatus::Rejected),
];

pub const RISK_SCORE: FilterTable<RiskScore> = &[
    ("low", RiskScore::Low),
    ("medium", RiskScore::Medium),
    ("high", RiskScore::High),
];

pub const SERVICE_TYPE: FilterTable<ServiceType> = &[
    ("remittance", ServiceType::Remittance),
    ("cico", ServiceType::Cico),
    ("micro-insurance", ServiceType::MicroInsurance),
    ("microinsurance", ServiceType::MicroInsurance),
    ("bills-payment", ServiceType::BillsPayment),
];

pub const SERVICE_REQUEST_STATUS: FilterTable<ServiceRequestStatus> = &[
    ("pending", ServiceRequestStatus::Pending),
    ("accepted", ServiceRequestStatus::Accepted),
    ("rejected", ServiceRequestStatus::Rejected),
];

pub const INVITE_STATUS: FilterTable<InviteStatus> = &[
    ("invited", InviteStatus::Invited),
    ("accepted", InviteStatus::Accepted),
    ("expired", InviteStatus::Expired),
];

pub const PARTNER: FilterTable<PartnerType> = &[
    ("wu", PartnerType::WesternUnion),
    ("westernunion", PartnerType::WesternUnion),
    ("ria", PartnerType::Ria),
    ("transfast", PartnerType::Transfast),
    ("cebuana", PartnerType::Cebuana),
    ("iremit", PartnerType::IRemit),
    ("remitly", PartnerType::Remitly),
    ("instacash", PartnerType::InstaCash),
    ("uniteller", PartnerType::UniTeller),
    ("ayannah", PartnerType::Ayannah),
    ("intelexpress", PartnerType::IntelExpress),
    ("japanremit", PartnerType::JapanRemit),
    ("ussc", PartnerType::Ussc),
    ("metrobank", PartnerType::MetrobankRemit),
];

pub const SORT_ORDER: FilterTable<SortOrder> = &[
    ("asc", SortOrder::Asc),
    ("ascending", SortOrder::Asc),
    ("desc", SortOrder::Desc),
    ("descending", SortOrder::Desc),
];

/// Sort direction passed to list RPCs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Look up a single value, case-insensitively.
pub fn lookup<T: Copy>(table: FilterTable<T>, raw: &str) -> Option<T> {
    let needle = raw.trim();
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(needle))
        .map(|(_, value)| *value)
}

/// Parse a comma-separated filter list.
///
/// Unknown values are logged and skipped; duplicates collapse to the first
/// occurrence so the backend sees each value once.
pub fn parse_filter_list<T: Copy + PartialEq>(raw: Option<&str>, table: FilterTable<T>) -> Vec<T> {
    let mut values = Vec::new();
    for part in raw.unwrap_or_default().split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match lookup(table, part) {
            Some(value) if !values.contains(&value) => values.push(value),
            Some(_) => {}
            None => tracing::warn!(value = part, "ignoring unknown filter value"),
        }
    }
    values
}

/// Parse the `sort` query value, defaulting to descending.
pub fn parse_sort(raw: Option<&str>) -> SortOrder {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => SortOrder::default(),
        Some(value) => lookup(SORT_ORDER, value).unwrap_or_else(|| {
            tracing::warn!(sort = value, "ignoring unknown sort order");
            SortOrder::default()
        }),
    }
}

/// Accept `sort_column` only when it names one of the view's sortable columns.
pub fn parse_sort_column(raw: Option<&str>, allowed: &[&'static str], default: &'static str) -> &'static str {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    allowed
        .iter()
        .copied()
        .find(|column| column.eq_ignore_ascii_case(value))
        .unwrap_or_else(|| {
            tracing::warn!(sort_column = value, "ignoring unsortable column");
            default
        })
}
