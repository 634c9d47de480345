//! Organization branches (locations).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub id: String,
    pub org_id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub zip: String,
    pub phone: String,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBranchesRequest {
    pub org_id: Uuid,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchList {
    pub branches: Vec<Branch>,
    pub total: u64,
}
