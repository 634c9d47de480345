//! Remittance, CICO and micro-insurance history, one instance per API
//! environment (sandbox and live).

use crate::models::transaction::{
    CicoList, MicroInsuranceList, Remittance, RemittanceList, TransactionListRequest,
};
use crate::services::{ServiceError, rpc::RpcClient};
use async_trait::async_trait;
use serde_json::json;

#[async_trait]
pub trait TransactionService: Send + Sync + 'static {
    /// Reachability of the transaction backend, reported by `/health`.
    async fn ping(&self) -> Result<(), ServiceError>;

    async fn list_remittances(&self, request: TransactionListRequest) -> Result<RemittanceList, ServiceError>;
    async fn get_remittance(&self, id: &str) -> Result<Remittance, ServiceError>;
    async fn list_cico(&self, request: TransactionListRequest) -> Result<CicoList, ServiceError>;
    async fn list_micro_insurance(
        &self,
        request: TransactionListRequest,
    ) -> Result<MicroInsuranceList, ServiceError>;
}

#[async_trait]
impl TransactionService for RpcClient {
    async fn ping(&self) -> Result<(), ServiceError> {
        self.health_check().await
    }

    async fn list_remittances(&self, request: TransactionListRequest) -> Result<RemittanceList, ServiceError> {
        self.call("ListRemittanceHistory", &request).await
    }

    async fn get_remittance(&self, id: &str) -> Result<Remittance, ServiceError> {
        self.call("GetRemittance", &json!({ "id": id })).await
    }

    async fn list_cico(&self, request: TransactionListRequest) -> Result<CicoList, ServiceError> {
        self.call("ListCicoHistory", &request).await
    }

    async fn list_micro_insurance(
        &self,
        request: TransactionListRequest,
    ) -> Result<MicroInsuranceList, ServiceError> {
        self.call("ListMicroInsuranceHistory", &request).await
    }
}
