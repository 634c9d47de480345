//! Organization (DSA applicant) profiles.

use crate::models::filters::SortOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of an applicant organization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgStatus {
    /// Profile not yet completed by the applicant
    #[default]
    Unknown,
    Pending,
    PendingDocuments,
    Accepted,
    Completed,
    Rejected,
}

impl OrgStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrgStatus::Unknown => "Unknown",
            OrgStatus::Pending => "Pending",
            OrgStatus::PendingDocuments => "PendingDocuments",
            OrgStatus::Accepted => "Accepted",
            OrgStatus::Completed => "Completed",
            OrgStatus::Rejected => "Rejected",
        }
    }

    /// Status text shown to staff.
    pub fn display_status(self) -> &'static str {
        match self {
            OrgStatus::Unknown => "Incomplete",
            OrgStatus::PendingDocuments => "Pending Documents",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskScore {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
}

/// Transaction channels an organization is enrolled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransactionTypes {
    pub otc: bool,
    pub digital: bool,
}

impl TransactionTypes {
    /// Serialize back into the comma-separated tag form stored on the profile.
    pub fn to_tags(self) -> String {
        let mut tags = Vec::with_capacity(2);
        if self.otc {
            tags.push("OTC");
        }
        if self.digital {
            tags.push("DIGITAL");
        }
        tags.join(",")
    }
}

/// Parse the profile's comma-separated transaction type tags.
///
/// `"OTC,DIGITAL"` enables both channels, `"OTC"` only over-the-counter,
/// and an empty string neither.
pub fn check_trn_type_for_dsa_code(tags: &str) -> TransactionTypes {
    let mut types = TransactionTypes::default();
    for tag in tags.split(',').map(str::trim) {
        if tag.eq_ignore_ascii_case("OTC") {
            types.otc = true;
        } else if tag.eq_ignore_ascii_case("DIGITAL") {
            types.digital = true;
        }
    }
    types
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub line: String,
    pub city: String,
    pub province: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub company_name: String,
    pub store_name: String,
    pub address: Address,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub currency: String,
}

/// Organization profile as returned by the profile service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgProfile {
    pub id: Uuid,
    pub business_info: BusinessInfo,
    pub account_info: AccountInfo,
    pub status: OrgStatus,
    pub risk_score: RiskScore,

    /// Comma-separated channel tags, e.g. `"OTC,DIGITAL"`
    pub transaction_types: String,
    pub dsa_code: String,
    pub terminal_id_otc: String,
    pub terminal_id_digital: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOrgProfilesRequest {
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortOrder,
    pub sort_column: String,
    pub company_name: String,
    pub statuses: Vec<OrgStatus>,
    pub risk_scores: Vec<RiskScore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrgProfileList {
    pub profiles: Vec<OrgProfile>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrgStatusRequest {
    pub org_id: Uuid,
    pub status: OrgStatus,
    pub remark: String,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDsaCodeRequest {
    pub org_id: Uuid,
    pub dsa_code: String,
    pub transaction_types: String,
    pub terminal_id_otc: String,
    pub terminal_id_digital: String,
    pub updated_by: String,
}
