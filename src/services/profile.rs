//! Profile/organization service: org profiles, uploads, branches, fees,
//! partners, revenue sharing and service requests.

use crate::models::{
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
pub trait ProfileService: Send + Sync + 'static {
    /// Reachability of the profile backend, reported by `/health`.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn list_org_profiles(&self, request: ListOrgProfilesRequest) -> Result<OrgProfileList, ServiceError>;
    async fn get_org_profile(&self, org_id: Uuid) -> Result<OrgProfile, ServiceError>;
    async fn update_org_status(&self, request: UpdateOrgStatusRequest) -> Result<(), ServiceError>;
    async fn update_dsa_code(&self, request: UpdateDsaCodeRequest) -> Result<(), ServiceError>;

    async fn list_file_uploads(&self, org_id: Uuid) -> Result<Vec<FileUpload>, ServiceError>;

    async fn list_partners(&self, org_id: Uuid) -> Result<Vec<PartnerConfig>, ServiceError>;
    async fn upsert_partner(&self, config: PartnerConfig) -> Result<(), ServiceError>;
    async fn set_partner_status(
        &self,
        org_id: Uuid,
        partner: PartnerType,
        status: PartnerStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError>;

    async fn list_branches(&self, request: ListBranchesRequest) -> Result<BranchList, ServiceError>;
    async fn create_branch(&self, branch: Branch) -> Result<String, ServiceError>;
    async fn delete_branch(&self, org_id: Uuid, branch_id: &str) -> Result<(), ServiceError>;

    async fn get_currency(&self, org_id: Uuid) -> Result<CurrencyConfig, ServiceError>;
    async fn upsert_currency(&self, config: CurrencyConfig) -> Result<(), ServiceError>;

    async fn list_fees(&self, org_id: Uuid) -> Result<Vec<FeeSchedule>, ServiceError>;
    async fn upsert_fee(&self, schedule: FeeSchedule) -> Result<String, ServiceError>;

    async fn list_revenue_sharing(
        &self,
        org_id: Uuid,
        partner: PartnerType,
    ) -> Result<Vec<RevenueSharingRule>, ServiceError>;
    /// Create or replace the rule for `rule.key`, returning its id.
    async fn upsert_revenue_sharing(&self, rule: RevenueSharingRule) -> Result<String, ServiceError>;
    /// Replace every tier of a rule.
    async fn upsert_revenue_sharing_tiers(
        &self,
        rule_id: &str,
        tiers: Vec<RevenueSharingTier>,
    ) -> Result<(), ServiceError>;
    async fn delete_revenue_sharing(&self, key: RevenueSharingKey) -> Result<(), ServiceError>;

    async fn list_service_requests(
        &self,
        request: ListServiceRequestsRequest,
    ) -> Result<ServiceRequestList, ServiceError>;
    async fn set_service_request_status(
        &self,
        org_id: Uuid,
        service: ServiceType,
        status: ServiceRequestStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError>;
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

#[async_trait]
impl ProfileService for RpcClient {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.health_check().await
    }

    async fn list_org_profiles(&self, request: ListOrgProfilesRequest) -> Result<OrgProfileList, ServiceError> {
        self.call("ListOrgProfiles", &request).await
    }

    async fn get_org_profile(&self, org_id: Uuid) -> Result<OrgProfile, ServiceError> {
        self.call("GetOrgProfile", &json!({ "org_id": org_id })).await
    }

    async fn update_org_status(&self, request: UpdateOrgStatusRequest) -> Result<(), ServiceError> {
        self.call::<_, Ack>("UpdateOrgProfileStatus", &request).await?;
        Ok(())
    }

    async fn update_dsa_code(&self, request: UpdateDsaCodeRequest) -> Result<(), ServiceError> {
        self.call::<_, Ack>("UpdateDsaCode", &request).await?;
        Ok(())
    }

    async fn list_file_uploads(&self, org_id: Uuid) -> Result<Vec<FileUpload>, ServiceError> {
        let response: Items<FileUpload> = self.call("ListFileUploads", &json!({ "org_id": org_id })).await?;
        Ok(response.items)
    }

    async fn list_partners(&self, org_id: Uuid) -> Result<Vec<PartnerConfig>, ServiceError> {
        let response: Items<PartnerConfig> = self.call("ListPartners", &json!({ "org_id": org_id })).await?;
        Ok(response.items)
    }

    async fn upsert_partner(&self, config: PartnerConfig) -> Result<(), ServiceError> {
        self.call::<_, Ack>("UpsertPartner", &config).await?;
        Ok(())
    }

    async fn set_partner_status(
        &self,
        org_id: Uuid,
        partner: PartnerType,
        status: PartnerStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError> {
        let request = json!({
            "org_id": org_id,
            "partner": partner,
            "status": status,
            "updated_by": updated_by,
        });
        self.call::<_, Ack>("SetPartnerStatus", &request).await?;
        Ok(())
    }

    async fn list_branches(&self, request: ListBranchesRequest) -> Result<BranchList, ServiceError> {
        self.call("ListBranches", &request).await
    }

    async fn create_branch(&self, branch: Branch) -> Result<String, ServiceError> {
        let created: Created = self.call("CreateBranch", &branch).await?;
        Ok(created.id)
    }

    async fn delete_branch(&self, org_id: Uuid, branch_id: &str) -> Result<(), ServiceError> {
        let request = json!({ "org_id": org_id, "branch_id": branch_id });
        self.call::<_, Ack>("DeleteBranch", &request).await?;
        Ok(())
    }

    async fn get_currency(&self, org_id: Uuid) -> Result<CurrencyConfig, ServiceError> {
        self.call("GetCurrency", &json!({ "org_id": org_id })).await
    }

    async fn upsert_currency(&self, config: CurrencyConfig) -> Result<(), ServiceError> {
        self.call::<_, Ack>("UpsertCurrency", &config).await?;
        Ok(())
    }

    async fn list_fees(&self, org_id: Uuid) -> Result<Vec<FeeSchedule>, ServiceError> {
        let response: Items<FeeSchedule> = self.call("ListFees", &json!({ "org_id": org_id })).await?;
        Ok(response.items)
    }

    async fn upsert_fee(&self, schedule: FeeSchedule) -> Result<String, ServiceError> {
        let created: Created = self.call("UpsertFee", &schedule).await?;
        Ok(created.id)
    }

    async fn list_revenue_sharing(
        &self,
        org_id: Uuid,
        partner: PartnerType,
    ) -> Result<Vec<RevenueSharingRule>, ServiceError> {
        let request = json!({ "org_id": org_id, "partner": partner });
        let response: Items<RevenueSharingRule> = self.call("ListRevenueSharing", &request).await?;
        Ok(response.items)
    }

    async fn upsert_revenue_sharing(&self, rule: RevenueSharingRule) -> Result<String, ServiceError> {
        let created: Created = self.call("UpsertRevenueSharing", &rule).await?;
        Ok(created.id)
    }

    async fn upsert_revenue_sharing_tiers(
        &self,
        rule_id: &str,
        tiers: Vec<RevenueSharingTier>,
    ) -> Result<(), ServiceError> {
        let request = json!({ "rule_id": rule_id, "tiers": tiers });
        self.call::<_, Ack>("UpsertRevenueSharingTiers", &request).await?;
        Ok(())
    }

    async fn delete_revenue_sharing(&self, key: RevenueSharingKey) -> Result<(), ServiceError> {
        self.call::<_, Ack>("DeleteRevenueSharing", &key).await?;
        Ok(())
    }

    async fn list_service_requests(
        &self,
        request: ListServiceRequestsRequest,
    ) -> Result<ServiceRequestList, ServiceError> {
        self.call("ListServiceRequests", &request).await
    }

    async fn set_service_request_status(
        &self,
        org_id: Uuid,
        service: ServiceType,
        status: ServiceRequestStatus,
        updated_by: &str,
    ) -> Result<(), ServiceError> {
        let request = json!({
            "org_id": org_id,
            "service": service,
            "status": status,
            "updated_by": updated_by,
        });
        self.call::<_, Ack>("SetServiceRequestStatus", &request).await?;
        Ok(())
    }
}
