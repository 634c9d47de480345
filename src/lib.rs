//! Remittance back-office console.
//!
//! Server-rendered staff console over the profile, RBAC and transaction
//! services. The console owns no data: handlers read and mutate through
//! the backend service traits and render HTML templates.
//!
//! # Request Flow
//!
//! 1. The auth proxy forwards the staff identity as headers
//! 2. [`middleware::auth::staff_identity`] turns them into a `StaffContext`
//! 3. The handler parses input, calls backends and renders or redirects
//! 4. Any failure becomes a 303 redirect to [`error::ERROR_PATH`]

pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod render;
pub mod services;
pub mod state;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use state::{Server, Settings};

/// Build the console router.
pub fn router(server: Server) -> Router {
    // Everything under the dashboard requires a staff identity
    let staff_routes = Router::new()
        // DSA applicants
        .route("/dashboard/dsa-applicant-list", get(handlers::dashboard::list_applicants))
        .route("/dashboard/dsa-applicant/{id}", get(handlers::dashboard::applicant_detail))
        .route("/dashboard/dsa-applicant/{id}/status", post(handlers::dashboard::update_status))
        .route("/dashboard/dsa-applicant/{id}/dsa-code", post(handlers::dashboard::update_dsa_code))
        // Users and roles
        .route("/dashboard/users", get(handlers::users::list_users))
        .route("/dashboard/users/{id}", get(handlers::users::user_detail))
        .route(
            "/dashboard/roles",
            get(handlers::roles::list_roles).post(handlers::roles::create_role),
        )
        .route("/dashboard/roles/{id}/delete", post(handlers::roles::delete_role))
        // Credentials
        .route("/api-key/{apienv}", get(handlers::api_keys::list_api_keys))
        .route("/api-key/generate/{apienv}", post(handlers::api_keys::generate_api_key))
        .route(
            "/api-key/{apienv}/{client_id}/disable",
            post(handlers::api_keys::disable_api_key),
        )
        .route(
            "/dashboard/oauth2-clients",
            get(handlers::oauth::list_oauth_clients).post(handlers::oauth::create_oauth_client),
        )
        .route(
            "/dashboard/oauth2-clients/{id}/disable",
            post(handlers::oauth::disable_oauth_client),
        )
        // Organization configuration
        .route(
            "/dashboard/currency/{id}",
            get(handlers::currency::currency_settings).post(handlers::currency::save_currency),
        )
        .route(
            "/dashboard/location/{id}",
            get(handlers::branches::list_branches).post(handlers::branches::create_branch),
        )
        .route(
            "/dashboard/location/{id}/{branch_id}/delete",
            post(handlers::branches::delete_branch),
        )
        .route(
            "/dashboard/fee-management/{id}",
            get(handlers::fees::fee_management).post(handlers::fees::save_fee),
        )
        .route(
            "/dashboard/revenue-sharing-mgt/{id}",
            get(handlers::revenue_sharing::revenue_sharing).post(handlers::revenue_sharing::save_revenue_sharing),
        )
        .route(
            "/dashboard/partners/{id}",
            get(handlers::partners::list_partners).post(handlers::partners::save_partner),
        )
        .route(
            "/dashboard/partners/{id}/{partner}/status",
            post(handlers::partners::set_partner_status),
        )
        .route(
            "/dashboard/service-requests",
            get(handlers::service_requests::list_service_requests),
        )
        .route(
            "/dashboard/service-requests/{id}/{service}/status",
            post(handlers::service_requests::set_service_request_status),
        )
        // Transaction history
        .route(
            "/dashboard/transactions/{apienv}/remittance",
            get(handlers::transactions::remittance_history),
        )
        .route(
            "/dashboard/transactions/{apienv}/remittance/{id}",
            get(handlers::transactions::remittance_detail),
        )
        .route(
            "/dashboard/transactions/{apienv}/cico",
            get(handlers::transactions::cico_history),
        )
        .route(
            "/dashboard/transactions/{apienv}/micro-insurance",
            get(handlers::transactions::micro_insurance_history),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            server.clone(),
            middleware::auth::staff_identity,
        ));

    Router::new()
        // Public routes
        .route("/health", get(handlers::health::health_check))
        .route(error::ERROR_PATH, get(handlers::error_page::error_page))
        .merge(staff_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}
