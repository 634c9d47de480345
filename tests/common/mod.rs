//! In-memory backends and renderer shared by the HTTP tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use remit_console::{
    Server, Settings,
    middleware::auth::{CSRF_TOKEN_HEADER, STAFF_EMAIL_HEADER, STAFF_ID_HEADER},
    models::{
        branch::{Branch, BranchList, ListBranchesRequest},
        currency::CurrencyConfig,
        fees::FeeSchedule,
        files::FileUpload,
        org::{ListOrgProfilesRequest, OrgProfile, OrgProfileList, UpdateDsaCodeRequest, UpdateOrgStatusRequest},
        partner::{
            ListServiceRequestsRequest, PartnerConfig, PartnerStatus, PartnerType, ServiceRequestList,
            ServiceRequestStatus, ServiceType,
        },
        revenue::{RevenueSharingKey, RevenueSharingRule, RevenueSharingTier},
        transaction::{CicoList, MicroInsuranceList, Remittance, RemittanceList, TransactionListRequest},
        user::{
            ApiClient, ApiEnv, CreateApiClientRequest, CreateOAuthClientRequest, CreateRoleRequest,
            IssuedCredential, ListRolesRequest, ListUsersRequest, OAuthClient, RoleList, User, UserList,
        },
    },
    render::{RenderError, Renderer},
    router,
    services::{ProfileService, RbacService, ServiceError, TransactionService},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const STAFF_ID: &str = "staff-1";
pub const CSRF_TOKEN: &str = "csrf-abc";

fn unavailable() -> ServiceError {
    ServiceError::Status {
        status: 503,
        message: "unavailable".to_string(),
    }
}

/// Fake for all three backend services.
///
/// Every call is recorded with its arguments as JSON so tests can assert on
/// exactly what reached the backend.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<(String, Value)>>,

    /// Profile returned by `get_org_profile`; `None` means not found
    pub profile: Option<OrgProfile>,
    pub profiles: Vec<OrgProfile>,
    pub total: u64,
    pub user: Option<User>,
    pub remittance: Option<Remittance>,

    /// List calls fail with a 503
    pub fail_lists: bool,

    /// Health pings fail
    pub unreachable: bool,

    pub mfa_valid: bool,
}

impl FakeBackend {
    pub fn with_profile(org_id: Uuid) -> Self {
        Self {
            profile: Some(OrgProfile {
                id: org_id,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn record(&self, method: &str, args: impl Serialize) {
        let args = serde_json::to_value(args).unwrap_or(Value::Null);
        self.calls.lock().unwrap().push((method.to_string(), args));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of every call to `method`, in order.
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == method)
            .map(|(_, args)| args)
            .collect()
    }

    /// Names of the calls that changed backend state.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(name, _)| name)
            .filter(|name| !name.starts_with("list_") && !name.starts_with("get_") && name != "ping")
            .collect()
    }

    fn list<T: Default>(&self, method: &str, args: impl Serialize) -> Result<T, ServiceError> {
        self.record(method, args);
        if self.fail_lists { Err(unavailable()) } else { Ok(T::default()) }
    }

    fn ping_result(&self) -> Result<(), ServiceError> {
        if self.unreachable { Err(unavailable()) } else { Ok(()) }
    }
}

#[async_trait]
impl ProfileService for FakeBackend {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.ping_result()
    }

    async fn list_org_profiles(&self, request: ListOrgProfilesRequest) -> Result<OrgProfileList, ServiceError> {
        self.record("list_org_profiles", &request);
        if self.fail_lists {
            return Err(unavailable());
        }
        Ok(OrgProfileList {
            profiles: self.profiles.clone(),
            total: self.total,
        })
    }

    async fn get_org_profile(&self, org_id: Uuid) -> Result<OrgProfile, ServiceError> {
        self.record("get_org_profile", org_id);
        self.profile.clone().ok_or(ServiceError::NotFound)
    }

    async fn update_org_status(&self, request: UpdateOrgStatusRequest) -> Result<(), ServiceError> {
        self.record("update_org_status", request);
        Ok(())
    }

    async fn update_dsa_code(&self, request: UpdateDsaCodeRequest) -> Result<(), ServiceError> {
        self.record("update_dsa_code", request);
        Ok(())
    }

    async fn list_file_uploads(&self, org_id: Uuid) -> Result<Vec<FileUpload>, ServiceError> {
        self.list("list_file_uploads", org_id)
    }

    async fn list_partners(&self, org_id: Uuid) -> Result<Vec<PartnerConfig>, ServiceError> {
        self.list("list_partners", org_id)
    }

    async fn upsert_partner(&self, config: PartnerConfig) -> Result<(), ServiceError> {
        self.record("upsert_partner", config);
        Ok(())
    }

    async fn set_partner_status(
        &self,
        org_id: Uuid,
        partner: PartnerType,
        status: PartnerStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError> {
        self.record("set_partner_status", (org_id, partner, status, updated_by));
        Ok(())
    }

    async fn list_branches(&self, request: ListBranchesRequest) -> Result<BranchList, ServiceError> {
        self.list("list_branches", request)
    }

    async fn create_branch(&self, branch: Branch) -> Result<String, ServiceError> {
        self.record("create_branch", branch);
        Ok("branch-1".to_string())
    }

    async fn delete_branch(&self, org_id: Uuid, branch_id: &str) -> Result<(), ServiceError> {
        self.record("delete_branch", (org_id, branch_id));
        Ok(())
    }

    async fn get_currency(&self, org_id: Uuid) -> Result<CurrencyConfig, ServiceError> {
        self.record("get_currency", org_id);
        Err(ServiceError::NotFound)
    }

    async fn upsert_currency(&self, config: CurrencyConfig) -> Result<(), ServiceError> {
        self.record("upsert_currency", config);
        Ok(())
    }

    async fn list_fees(&self, org_id: Uuid) -> Result<Vec<FeeSchedule>, ServiceError> {
        self.list("list_fees", org_id)
    }

    async fn upsert_fee(&self, schedule: FeeSchedule) -> Result<String, ServiceError> {
        self.record("upsert_fee", schedule);
        Ok("fee-1".to_string())
    }

    async fn list_revenue_sharing(
        &self,
        org_id: Uuid,
        partner: PartnerType,
    ) -> Result<Vec<RevenueSharingRule>, ServiceError> {
        self.list("list_revenue_sharing", (org_id, partner))
    }

    async fn upsert_revenue_sharing(&self, rule: RevenueSharingRule) -> Result<String, ServiceError> {
        let id = format!("rule-{:?}-{:?}", rule.key.bound, rule.key.channel);
        self.record("upsert_revenue_sharing", rule);
        Ok(id)
    }

    async fn upsert_revenue_sharing_tiers(
        &self,
        rule_id: &str,
        tiers: Vec<RevenueSharingTier>,
    ) -> Result<(), ServiceError> {
        self.record("upsert_revenue_sharing_tiers", (rule_id, tiers));
        Ok(())
    }

    async fn delete_revenue_sharing(&self, key: RevenueSharingKey) -> Result<(), ServiceError> {
        self.record("delete_revenue_sharing", key);
        Err(ServiceError::NotFound)
    }

    async fn list_service_requests(
        &self,
        request: ListServiceRequestsRequest,
    ) -> Result<ServiceRequestList, ServiceError> {
        self.list("list_service_requests", request)
    }

    async fn set_service_request_status(
        &self,
        org_id: Uuid,
        service: ServiceType,
        status: ServiceRequestStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError> {
        self.record("set_service_request_status", (org_id, service, status, updated_by));
        Ok(())
    }
}

#[async_trait]
impl RbacService for FakeBackend {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.ping_result()
    }

    async fn list_users(&self, request: ListUsersRequest) -> Result<UserList, ServiceError> {
        self.list("list_users", request)
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ServiceError> {
        self.record("get_user", user_id);
        self.user.clone().ok_or(ServiceError::NotFound)
    }

    async fn list_roles(&self, request: ListRolesRequest) -> Result<RoleList, ServiceError> {
        self.list("list_roles", request)
    }

    async fn create_role(&self, request: CreateRoleRequest) -> Result<String, ServiceError> {
        self.record("create_role", request);
        Ok("role-1".to_string())
    }

    async fn delete_role(&self, role_id: &str) -> Result<(), ServiceError> {
        self.record("delete_role", role_id);
        Ok(())
    }

    async fn list_api_clients(&self, org_id: Uuid, env: ApiEnv) -> Result<Vec<ApiClient>, ServiceError> {
        self.list("list_api_clients", (org_id, env))
    }

    async fn create_api_client(&self, request: CreateApiClientRequest) -> Result<IssuedCredential, ServiceError> {
        self.record("create_api_client", request);
        Ok(IssuedCredential {
            client_id: "client-1".to_string(),
            client_secret: "secret-1".to_string(),
        })
    }

    async fn disable_api_client(&self, client_id: &str, env: ApiEnv) -> Result<(), ServiceError> {
        self.record("disable_api_client", (client_id, env));
        Ok(())
    }

    async fn list_oauth_clients(&self, org_id: Uuid) -> Result<Vec<OAuthClient>, ServiceError> {
        self.list("list_oauth_clients", org_id)
    }

    async fn create_oauth_client(&self, request: CreateOAuthClientRequest) -> Result<IssuedCredential, ServiceError> {
        self.record("create_oauth_client", request);
        Ok(IssuedCredential {
            client_id: "oauth-1".to_string(),
            client_secret: "oauth-secret".to_string(),
        })
    }

    async fn disable_oauth_client(&self, client_id: &str) -> Result<(), ServiceError> {
        self.record("disable_oauth_client", client_id);
        Ok(())
    }

    async fn validate_mfa(&self, user_id: &str, code: &str) -> Result<bool, ServiceError> {
        self.record("validate_mfa", (user_id, code));
        Ok(self.mfa_valid)
    }
}

#[async_trait]
impl TransactionService for FakeBackend {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.ping_result()
    }

    async fn list_remittances(&self, request: TransactionListRequest) -> Result<RemittanceList, ServiceError> {
        self.list("list_remittances", request)
    }

    async fn get_remittance(&self, id: &str) -> Result<Remittance, ServiceError> {
        self.record("get_remittance", id);
        self.remittance.clone().ok_or(ServiceError::NotFound)
    }

    async fn list_cico(&self, request: TransactionListRequest) -> Result<CicoList, ServiceError> {
        self.list("list_cico", request)
    }

    async fn list_micro_insurance(
        &self,
        request: TransactionListRequest,
    ) -> Result<MicroInsuranceList, ServiceError> {
        self.list("list_micro_insurance", request)
    }
}

/// Renderer that records every view model and echoes the template name.
#[derive(Default)]
pub struct CaptureRenderer {
    pub rendered: Mutex<Vec<(String, Value)>>,

    /// Every lookup fails as if the template directory were empty
    pub missing: bool,
}

impl CaptureRenderer {
    pub fn last(&self) -> Option<(String, Value)> {
        self.rendered.lock().unwrap().last().cloned()
    }

    pub fn last_context(&self) -> Value {
        self.last().map(|(_, context)| context).unwrap_or(Value::Null)
    }
}

impl Renderer for CaptureRenderer {
    fn render(&self, name: &str, context: &Value) -> Result<String, RenderError> {
        if self.missing {
            return Err(RenderError::NotFound(name.to_string()));
        }
        self.rendered
            .lock()
            .unwrap()
            .push((name.to_string(), context.clone()));
        Ok(format!("rendered {name}"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<FakeBackend>,
    pub renderer: Arc<CaptureRenderer>,
}

impl TestApp {
    pub fn new(backend: FakeBackend) -> Self {
        Self::with_renderer(backend, CaptureRenderer::default())
    }

    pub fn with_renderer(backend: FakeBackend, renderer: CaptureRenderer) -> Self {
        let backend = Arc::new(backend);
        let renderer = Arc::new(renderer);
        let server = Server {
            profile: backend.clone(),
            rbac: backend.clone(),
            sandbox: backend.clone(),
            live: backend.clone(),
            renderer: renderer.clone(),
            settings: Settings {
                per_page: 10,
                max_form_rows: 5,
                login_path: "/login".to_string(),
            },
        };
        Self {
            router: router(server),
            backend,
            renderer,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(staff_request("GET", uri, Body::empty())).await
    }

    pub async fn post(&self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let mut request = staff_request("POST", uri, Body::from(body));
        request.headers_mut().insert(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        self.send(request).await
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub fn staff_request(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(STAFF_ID_HEADER, STAFF_ID)
        .header(STAFF_EMAIL_HEADER, "reviewer@example.com")
        .header(CSRF_TOKEN_HEADER, CSRF_TOKEN)
        .body(body)
        .unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

pub fn assert_redirect(response: &Response<Body>, target: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), target);
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn org_id() -> Uuid {
    Uuid::parse_str("5f0c1f2e-8a51-4d61-9c0e-0b1d2a3c4e5f").unwrap()
}
