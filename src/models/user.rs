//! RBAC-owned identities: users, roles, API clients and OAuth2 clients.
//!
//! None of these are stored by the console; they are read from and
//! mutated through the RBAC service.

use crate::models::filters::SortOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteStatus {
    #[default]
    Unknown,
    Invited,
    Accepted,
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub org_id: Option<Uuid>,
    pub org_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: String,
    pub invite_status: InviteStatus,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUsersRequest {
    pub org_id: Option<Uuid>,
    pub limit: u32,
    pub offset: u32,
    pub sort_by: SortOrder,
    pub sort_column: String,
    pub search_term: String,
    pub invite_statuses: Vec<InviteStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListRolesRequest {
    pub limit: u32,
    pub offset: u32,
    pub search_term: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleList {
    pub roles: Vec<Role>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: String,
    pub created_by: String,
}

/// Downstream API environment an API client is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnv {
    Sandbox,
    Live,
}

impl ApiEnv {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Some(ApiEnv::Sandbox),
            "live" | "production" => Some(ApiEnv::Live),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiEnv::Sandbox => "sandbox",
            ApiEnv::Live => "live",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiClient {
    pub client_id: String,
    pub org_id: Uuid,
    pub name: String,
    pub env: ApiEnv,
    pub active: bool,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateApiClientRequest {
    pub org_id: Uuid,
    pub name: String,
    pub env: ApiEnv,
    pub created_by: String,
}

/// Credentials returned once at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedCredential {
    pub client_id: String,
    pub client_secret: String,
}

/// Scopes an OAuth2 client may be granted.
pub const OAUTH_SCOPES: &[&str] = &[
    "openid",
    "offline_access",
    "remittance:read",
    "remittance:write",
    "cico:read",
    "cico:write",
    "microinsurance:read",
    "microinsurance:write",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthClient {
    pub client_id: String,
    pub org_id: Uuid,
    pub name: String,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
    pub active: bool,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOAuthClientRequest {
    pub org_id: Uuid,
    pub name: String,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
    pub created_by: String,
}
