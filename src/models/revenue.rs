//! Revenue-sharing rules.
//!
//! A rule is keyed by organization, partner, bound type and transaction
//! channel, and is either a flat percentage or a ladder of tiers.

use crate::models::partner::PartnerType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a remittance relative to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundType {
    Inbound,
    Outbound,
}

impl BoundType {
    pub const ALL: [BoundType; 2] = [BoundType::Inbound, BoundType::Outbound];

    /// Value of the `bound_type` field on the revenue-sharing form.
    pub fn form_value(self) -> &'static str {
        match self {
            BoundType::Inbound => "inbound",
            BoundType::Outbound => "outbound",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inbound" | "in" => Some(BoundType::Inbound),
            "outbound" | "out" => Some(BoundType::Outbound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionChannel {
    Otc,
    Digital,
}

impl TransactionChannel {
    pub const ALL: [TransactionChannel; 2] = [TransactionChannel::Otc, TransactionChannel::Digital];

    /// Suffix of this channel's fields on the revenue-sharing form.
    pub fn form_tag(self) -> &'static str {
        match self {
            TransactionChannel::Otc => "OTC",
            TransactionChannel::Digital => "DIGITAL",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierType {
    #[default]
    Percentage,
    Tiered,
}

impl TierType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "percentage" | "flat" => Some(TierType::Percentage),
            "tiered" | "tiered-percentage" => Some(TierType::Tiered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevenueSharingKey {
    pub org_id: Uuid,
    pub partner: PartnerType,
    pub bound: BoundType,
    pub channel: TransactionChannel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSharingTier {
    pub min_cents: i64,
    pub max_cents: i64,

    /// Share for this band in hundredths of a percent
    pub amount_hundredths: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSharingRule {
    #[serde(default)]
    pub id: String,
    pub key: RevenueSharingKey,
    pub tier_type: TierType,

    /// Flat share in hundredths of a percent (zero for tiered rules)
    pub percentage_hundredths: i64,
    #[serde(default)]
    pub tiers: Vec<RevenueSharingTier>,
    #[serde(default)]
    pub updated_by: String,
}
