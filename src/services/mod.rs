//! Backend service clients.
//!
//! The console owns no data. Every read and write goes through one of the
//! traits below, which the HTTP handlers receive as trait objects on the
//! shared [`Server`](crate::state::Server). [`rpc::RpcClient`] is the
//! production implementation of all three.

pub mod profile;
pub mod rbac;
pub mod rpc;
pub mod transactions;

pub use profile::ProfileService;
pub use rbac::RbacService;
pub use transactions::TransactionService;

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The requested entity does not exist.
    #[error("not found")]
    NotFound,

    /// The backend rejected the request with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or response decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured backend address could not be used.
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

/// Tolerate a failed call for data that only decorates a page.
///
/// The failure is logged and the zero value is used instead, so the page
/// still renders around the missing section. Missing data is routine (an
/// org with no currency configured yet) and is logged at `debug`; anything
/// else at `warn`.
pub fn tolerate<T: Default>(result: Result<T, ServiceError>, what: &'static str) -> T {
    match result {
        Ok(value) => value,
        Err(ServiceError::NotFound) => {
            tracing::debug!(what, "decorative data not found, using default");
            T::default()
        }
        Err(e) => {
            tracing::warn!(error = %e, what, "tolerating failed backend call");
            T::default()
        }
    }
}
