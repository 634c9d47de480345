//! Remittance partner catalog and service enrollment requests.

use crate::models::filters::SortOrder;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Remittance partners an organization can be enabled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartnerType {
    WesternUnion,
    Ria,
    Transfast,
    Cebuana,
    IRemit,
    Remitly,
    InstaCash,
    UniTeller,
    Ayannah,
    IntelExpress,
    JapanRemit,
    Ussc,
    MetrobankRemit,
}

impl PartnerType {
    pub const ALL: [PartnerType; 13] = [
        PartnerType::WesternUnion,
        PartnerType::Ria,
        PartnerType::Transfast,
        PartnerType::Cebuana,
        PartnerType::IRemit,
        PartnerType::Remitly,
        PartnerType::InstaCash,
        PartnerType::UniTeller,
        PartnerType::Ayannah,
        PartnerType::IntelExpress,
        PartnerType::JapanRemit,
        PartnerType::Ussc,
        PartnerType::MetrobankRemit,
    ];

    /// Short code used in forms and URLs.
    pub fn code(self) -> &'static str {
        match self {
            PartnerType::WesternUnion => "WU",
            PartnerType::Ria => "RIA",
            PartnerType::Transfast => "TF",
            PartnerType::Cebuana => "CEB",
            PartnerType::IRemit => "IR",
            PartnerType::Remitly => "RM",
            PartnerType::InstaCash => "IC",
            PartnerType::UniTeller => "UNT",
            PartnerType::Ayannah => "AYA",
            PartnerType::IntelExpress => "IE",
            PartnerType::JapanRemit => "JPR",
            PartnerType::Ussc => "USSC",
            PartnerType::MetrobankRemit => "MB",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PartnerType::WesternUnion => "Western Union",
            PartnerType::Ria => "Ria Money Transfer",
            PartnerType::Transfast => "Transfast",
            PartnerType::Cebuana => "Cebuana Lhuillier",
            PartnerType::IRemit => "iRemit",
            PartnerType::Remitly => "Remitly",
            PartnerType::InstaCash => "InstaCash",
            PartnerType::UniTeller => "UniTeller",
            PartnerType::Ayannah => "Ayannah",
            PartnerType::IntelExpress => "Intel Express",
            PartnerType::JapanRemit => "Japan Remit",
            PartnerType::Ussc => "USSC",
            PartnerType::MetrobankRemit => "Metrobank Remit",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|partner| partner.code().eq_ignore_ascii_case(code))
    }

    /// Configuration parameters the partner integration cannot run without.
    pub fn required_params(self) -> &'static [&'static str] {
        match self {
            PartnerType::WesternUnion => &["coy", "terminal_id"],
            PartnerType::Ria => &["agent_id", "branch_code"],
            PartnerType::Transfast => &["partner_id"],
            PartnerType::Cebuana => &["client_id", "branch_code"],
            PartnerType::IRemit => &["sender_code"],
            PartnerType::Remitly => &["partner_id"],
            PartnerType::InstaCash => &["agent_code"],
            PartnerType::UniTeller => &["partner_code", "branch_code"],
            PartnerType::Ayannah => &["partner_id"],
            PartnerType::IntelExpress => &["agent_code"],
            PartnerType::JapanRemit => &["partner_code"],
            PartnerType::Ussc => &["branch_code"],
            PartnerType::MetrobankRemit => &["sender_code", "branch_code"],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerStatus {
    #[default]
    Pending,
    Enabled,
    Disabled,
}

/// Per-organization configuration for one partner integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerConfig {
    pub org_id: Uuid,
    pub partner: PartnerType,
    pub params: BTreeMap<String, String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: PartnerStatus,
    #[serde(default)]
    pub updated_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Remittance,
    Cico,
    MicroInsurance,
    BillsPayment,
}

impl ServiceType {
    pub fn slug(self) -> &'static str {
        match self {
            ServiceType::Remittance => "remittance",
            ServiceType::Cico => "cico",
            ServiceType::MicroInsurance => "micro-insurance",
            ServiceType::BillsPayment => "bills-payment",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceRequestStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// An organization's request to be enrolled in a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub org_id: Uuid,
    pub company_name: String,
    pub service: ServiceType,
    #[serde(default)]
    pub partners: Vec<PartnerType>,
    pub status: ServiceRequestStatus,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListServiceRequestsRequest {
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortOrder,
    pub company_name: String,
    pub statuses: Vec<ServiceRequestStatus>,
    pub services: Vec<ServiceType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRequestList {
    pub requests: Vec<ServiceRequest>,
    pub total: u64,
}
