//! RBAC service: users, roles, API clients, OAuth2 clients and MFA.

use crate::models::user::{
    ApiClient, ApiEnv, CreateApiClientRequest, CreateOAuthClientRequest, CreateRoleRequest,
    IssuedCredential, ListRolesRequest, ListUsersRequest, OAuthClient, RoleList, User, UserList,
};
use crate::services::{
    ServiceError,
    rpc::{Ack, RpcClient},
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

#[async_trait]
pub trait RbacService: Send + Sync + 'static {
    /// Reachability of the RBAC backend, reported by `/health`.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn list_users(&self, request: ListUsersRequest) -> Result<UserList, ServiceError>;
    async fn get_user(&self, user_id: &str) -> Result<User, ServiceError>;

    async fn list_roles(&self, request: ListRolesRequest) -> Result<RoleList, ServiceError>;
    async fn create_role(&self, request: CreateRoleRequest) -> Result<String, ServiceError>;
    async fn delete_role(&self, role_id: &str) -> Result<(), ServiceError>;

    async fn list_api_clients(&self, org_id: Uuid, env: ApiEnv) -> Result<Vec<ApiClient>, ServiceError>;
    async fn create_api_client(&self, request: CreateApiClientRequest) -> Result<IssuedCredential, ServiceError>;
    async fn disable_api_client(&self, client_id: &str, env: ApiEnv) -> Result<(), ServiceError>;

    async fn list_oauth_clients(&self, org_id: Uuid) -> Result<Vec<OAuthClient>, ServiceError>;
    async fn create_oauth_client(&self, request: CreateOAuthClientRequest) -> Result<IssuedCredential, ServiceError>;
    async fn disable_oauth_client(&self, client_id: &str) -> Result<(), ServiceError>;

    /// Check a one-time MFA code for a staff user. `Ok(false)` means the code
    /// was well-formed but rejected.
    async fn validate_mfa(&self, user_id: &str, code: &str) -> Result<bool, ServiceError>;
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[derive(Deserialize)]
struct Items<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct MfaResult {
    valid: bool,
}

#[async_trait]
impl RbacService for RpcClient {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.health_check().await
    }

    async fn list_users(&self, request: ListUsersRequest) -> Result<UserList, ServiceError> {
        self.call("ListUsers", &request).await
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ServiceError> {
        self.call("GetUser", &json!({ "id": user_id })).await
    }

    async fn list_roles(&self, request: ListRolesRequest) -> Result<RoleList, ServiceError> {
        self.call("ListRoles", &request).await
    }

    async fn create_role(&self, request: CreateRoleRequest) -> Result<String, ServiceError> {
        let created: Created = self.call("CreateRole", &request).await?;
        Ok(created.id)
    }

    async fn delete_role(&self, role_id: &str) -> Result<(), ServiceError> {
        self.call::<_, Ack>("DeleteRole", &json!({ "id": role_id })).await?;
        Ok(())
    }

    async fn list_api_clients(&self, org_id: Uuid, env: ApiEnv) -> Result<Vec<ApiClient>, ServiceError> {
        let request = json!({ "org_id": org_id, "env": env });
        let response: Items<ApiClient> = self.call("ListApiClients", &request).await?;
        Ok(response.items)
    }

    async fn create_api_client(&self, request: CreateApiClientRequest) -> Result<IssuedCredential, ServiceError> {
        self.call("CreateApiClient", &request).await
    }

    async fn disable_api_client(&self, client_id: &str, env: ApiEnv) -> Result<(), ServiceError> {
        let request = json!({ "client_id": client_id, "env": env });
        self.call::<_, Ack>("DisableApiClient", &request).await?;
        Ok(())
    }

    async fn list_oauth_clients(&self, org_id: Uuid) -> Result<Vec<OAuthClient>, ServiceError> {
        let response: Items<OAuthClient> = self.call("ListOAuthClients", &json!({ "org_id": org_id })).await?;
        Ok(response.items)
    }

    async fn create_oauth_client(&self, request: CreateOAuthClientRequest) -> Result<IssuedCredential, ServiceError> {
        self.call("CreateOAuthClient", &request).await
    }

    async fn disable_oauth_client(&self, client_id: &str) -> Result<(), ServiceError> {
        self.call::<_, Ack>("DisableOAuthClient", &json!({ "client_id": client_id })).await?;
        Ok(())
    }

    async fn validate_mfa(&self, user_id: &str, code: &str) -> Result<bool, ServiceError> {
        let request = json!({ "user_id": user_id, "code": code });
        let result: MfaResult = self.call("ValidateMfa", &request).await?;
        Ok(result.valid)
    }
}
