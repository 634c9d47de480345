//! Application configuration management.
//!
//! Configuration is read from environment variables with `envy`, after an
//! optional `.env` file has been loaded.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `PROFILE_SERVICE_URL` (required): profile/organization service
/// - `RBAC_SERVICE_URL` (required): users, roles and credentials service
/// - `SANDBOX_TRANSACTION_URL` (required): sandbox transaction history
/// - `LIVE_TRANSACTION_URL` (required): live transaction history
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `TEMPLATE_DIR` (optional): template directory, defaults to `templates`
/// - `PER_PAGE` (optional): list page size, defaults to 20
/// - `MAX_FORM_ROWS` (optional): cap on repeated form rows, defaults to 50
/// - `BACKEND_TIMEOUT_SECS` (optional): per-call timeout, defaults to 10
/// - `LOGIN_PATH` (optional): where unauthenticated requests go, defaults to `/login`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub profile_service_url: String,
    pub rbac_service_url: String,
    pub sandbox_transaction_url: String,
    pub live_transaction_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_template_dir")]
    pub template_dir: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default = "default_max_form_rows")]
    pub max_form_rows: usize,

    #[serde(default = "default_backend_timeout")]
    pub backend_timeout_secs: u64,

    #[serde(default = "default_login_path")]
    pub login_path: String,
}

fn default_port() -> u16 {
    3000
}

fn default_template_dir() -> String {
    "templates".to_string()
}

fn default_per_page() -> u32 {
    20
}

fn default_max_form_rows() -> usize {
    50
}

fn default_backend_timeout() -> u64 {
    10
}

fn default_login_path() -> String {
    "/login".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed into the expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        envy::from_env::<Config>()
    }

    /// Build from an explicit set of variables, as `from_env` would.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(extra: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = [
            ("PROFILE_SERVICE_URL", "http://profile:8080"),
            ("RBAC_SERVICE_URL", "http://rbac:8080"),
            ("SANDBOX_TRANSACTION_URL", "http://sandbox:8080"),
            ("LIVE_TRANSACTION_URL", "http://live:8080"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        vars
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_vars(vars(&[])).expect("config");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.per_page, 20);
        assert_eq!(config.max_form_rows, 50);
        assert_eq!(config.login_path, "/login");
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_vars(vars(&[("PER_PAGE", "5"), ("SERVER_PORT", "8081")])).expect("config");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.server_port, 8081);
    }

    #[test]
    fn missing_backend_is_an_error() {
        let partial = vec![("PROFILE_SERVICE_URL".to_string(), "http://profile".to_string())];
        assert!(Config::from_vars(partial).is_err());
    }
}
