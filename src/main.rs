//! Remittance console - main application entry point.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create one RPC client per backend service
//! 3. Load templates from the configured directory
//! 4. Build the router and start serving on the configured port

use remit_console::{
    Server, Settings,
    config::Config,
    render::TemplateDir,
    router,
    services::rpc::RpcClient,
};
use std::{sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

const PROFILE_SERVICE: &str = "profile.v1.ProfileService";
const RBAC_SERVICE: &str = "rbac.v1.RbacService";
const TRANSACTION_SERVICE: &str = "transaction.v1.TransactionService";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG, defaults to "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let timeout = Duration::from_secs(config.backend_timeout_secs);
    let profile = RpcClient::new(&config.profile_service_url, PROFILE_SERVICE, timeout)?;
    let rbac = RpcClient::new(&config.rbac_service_url, RBAC_SERVICE, timeout)?;
    let sandbox = RpcClient::new(&config.sandbox_transaction_url, TRANSACTION_SERVICE, timeout)?;
    let live = RpcClient::new(&config.live_transaction_url, TRANSACTION_SERVICE, timeout)?;
    for client in [&profile, &rbac, &sandbox, &live] {
        tracing::info!(service = client.service(), "backend client ready");
    }

    let server = Server {
        profile: Arc::new(profile),
        rbac: Arc::new(rbac),
        sandbox: Arc::new(sandbox),
        live: Arc::new(live),
        renderer: Arc::new(TemplateDir::new(&config.template_dir)),
        settings: Settings {
            per_page: config.per_page,
            max_form_rows: config.max_form_rows,
            login_path: config.login_path.clone(),
        },
    };
    tracing::info!(template_dir = %config.template_dir, "Templates configured");

    let app = router(server);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
