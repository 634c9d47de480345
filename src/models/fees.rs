//! Fee and commission schedules.

use crate::models::partner::PartnerType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeKind {
    #[default]
    Fee,
    Commission,
}

impl FeeKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fee" => Some(FeeKind::Fee),
            "commission" => Some(FeeKind::Commission),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateKind {
    #[default]
    Fixed,
    Percentage,
}

impl RateKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(RateKind::Fixed),
            "percentage" => Some(RateKind::Percentage),
            _ => None,
        }
    }
}

/// One band of a fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    /// Lower bound of the transaction volume, in cents
    pub min_volume_cents: i64,

    /// Upper bound of the transaction volume, in cents
    pub max_volume_cents: i64,

    /// Cents for fixed rates, hundredths of a percent for percentage rates
    pub rate_hundredths: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    #[serde(default)]
    pub id: String,
    pub org_id: Uuid,
    pub partner: PartnerType,
    pub fee_kind: FeeKind,
    pub rate_kind: RateKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub tiers: Vec<FeeTier>,
    #[serde(default)]
    pub updated_by: String,
}
