//! Transaction history rows read from the sandbox and live transaction
//! services.
//!
//! Amounts are carried in cents, as the transaction services report them.

use crate::models::{filters::SortOrder, partner::PartnerType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filter and window shared by every history list call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListRequest {
    pub org_id: Option<Uuid>,
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortOrder,

    /// Control/reference number search
    pub search_term: String,
    pub partners: Vec<PartnerType>,
    pub from_date: Option<NaiveDate>,
    pub until_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Remittance {
    pub id: String,
    pub org_id: Option<Uuid>,
    pub control_number: String,
    pub partner: PartnerType,
    pub remit_type: String,
    pub sender_name: String,
    pub receiver_name: String,
    pub amount_cents: i64,
    pub charge_cents: i64,
    pub currency: String,
    pub status: String,
    pub transaction_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemittanceList {
    pub remittances: Vec<Remittance>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CicoTransaction {
    pub id: String,
    pub org_id: Option<Uuid>,
    pub reference_number: String,
    pub provider: String,

    /// "CASH_IN" or "CASH_OUT"
    pub trx_type: String,
    pub amount_cents: i64,
    pub charge_cents: i64,
    pub status: String,
    pub transaction_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CicoList {
    pub transactions: Vec<CicoTransaction>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroInsuranceTransaction {
    pub id: String,
    pub org_id: Option<Uuid>,
    pub trace_number: String,
    pub product: String,
    pub insured_name: String,
    pub premium_cents: i64,
    pub status: String,
    pub transaction_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MicroInsuranceList {
    pub transactions: Vec<MicroInsuranceTransaction>,
    pub total: u64,
}
