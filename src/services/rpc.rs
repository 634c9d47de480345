//! JSON-over-HTTP client for the backend services.
//!
//! Each backend exposes its methods as `POST {base}/rpc/{Service}/{Method}`
//! taking and returning JSON. One [`RpcClient`] is created per backend and
//! implements the matching service trait.

use crate::services::ServiceError;
use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use url::Url;

/// Empty response body for methods that only acknowledge.
#[derive(Debug, Default, serde::Deserialize)]
pub struct Ack {}

#[derive(Debug, Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    base: Url,
    service: &'static str,
}

impl RpcClient {
    /// Create a client for one backend service.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root address of the backend, e.g. `http://profile:8080`
    /// * `service` - Fully qualified service name used in method paths
    /// * `timeout` - Per-call timeout applied to every request
    pub fn new(base_url: &str, service: &'static str, timeout: Duration) -> Result<Self, ServiceError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base, service })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Invoke `method` with a JSON request and decode the JSON response.
    ///
    /// HTTP 404 becomes [`ServiceError::NotFound`]; any other non-2xx status
    /// becomes [`ServiceError::Status`] carrying the response body.
    pub async fn call<Req, Resp>(&self, method: &str, request: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.base.join(&format!("rpc/{}/{}", self.service, method))?;
        tracing::debug!(service = self.service, method, "backend call");

        let response = self.http.post(url).json(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Resp>().await?)
    }

    /// Reachability check used by the health endpoint.
    pub async fn health_check(&self) -> Result<(), ServiceError> {
        let url = self.base.join("healthz")?;
        let response = self.http.get(url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(ServiceError::Status {
                status: response.status().as_u16(),
                message: "health check failed".to_string(),
            })
        }
    }
}
