//! API client and OAuth2 client forms.

use crate::forms::{FieldErrors, FormFields, FormReader};
use crate::models::user::{ApiEnv, OAUTH_SCOPES};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientForm {
    pub org_id: Uuid,
    pub name: String,

    /// Present (and six digits) for live clients only
    pub mfa_code: Option<String>,
}

fn org_id(form: &mut FormReader<'_>) -> Uuid {
    let raw = form.required("org_id");
    if raw.is_empty() {
        return Uuid::nil();
    }
    Uuid::parse_str(&raw).unwrap_or_else(|_| {
        form.error("org_id", "Unknown organization");
        Uuid::nil()
    })
}

/// Parse an API client request. Live credentials need an MFA code.
pub fn parse_api_client(fields: &FormFields, env: ApiEnv) -> Result<ApiClientForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let org_id = org_id(&mut form);
    let name = form.required_max("name", 64);

    let mfa_code = match env {
        ApiEnv::Sandbox => None,
        ApiEnv::Live => {
            let code = form.required("mfa_code");
            if !code.is_empty() && (code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit())) {
                form.error("mfa_code", "Enter the 6-digit code from your authenticator");
            }
            Some(code)
        }
    };

    form.finish(ApiClientForm { org_id, name, mfa_code })
}

#[derive(Debug, Clone, PartialEq)]
pub struct OAuthClientForm {
    pub org_id: Uuid,
    pub name: String,
    pub redirect_uris: Vec<String>,
    pub scopes: Vec<String>,
}

/// Parse an OAuth2 client registration.
///
/// Redirect URIs may be submitted as repeated fields or one per line.
pub fn parse_oauth_client(fields: &FormFields) -> Result<OAuthClientForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let org_id = org_id(&mut form);
    let name = form.required_max("name", 64);

    let redirect_uris: Vec<String> = fields
        .all("redirect_uris")
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|uri| !uri.is_empty())
        .map(str::to_owned)
        .collect();

    if redirect_uris.is_empty() {
        form.error("redirect_uris", "Add at least one redirect URI");
    }
    for uri in &redirect_uris {
        if let Err(message) = validate_redirect_uri(uri) {
            form.error("redirect_uris", format!("{uri}: {message}"));
        }
    }

    let mut scopes: Vec<String> = Vec::new();
    for scope in fields.all("scopes") {
        if !OAUTH_SCOPES.contains(&scope) {
            form.error("scopes", format!("Unknown scope {scope}"));
        } else if !scopes.iter().any(|s| s == scope) {
            scopes.push(scope.to_string());
        }
    }

    form.finish(OAuthClientForm {
        org_id,
        name,
        redirect_uris,
        scopes,
    })
}

/// Validate an OAuth2 redirect URI.
///
/// # Rules
///
/// - Must be a valid absolute URL
/// - Must be HTTPS (HTTP allowed for localhost during integration)
/// - Maximum 2048 characters
/// - No fragment
pub fn validate_redirect_uri(uri: &str) -> Result<(), &'static str> {
    if uri.len() > 2048 {
        return Err("URL exceeds 2048 characters");
    }

    let parsed = url::Url::parse(uri).map_err(|_| "Invalid URL format")?;

    if parsed.fragment().is_some() {
        return Err("Redirect URIs must not contain a fragment");
    }

    match parsed.scheme() {
        "https" => Ok(()),
        "http" => match parsed.host_str() {
            Some("localhost") | Some("127.0.0.1") => Ok(()),
            _ => Err("HTTP is only allowed for localhost. Use HTTPS."),
        },
        _ => Err("URL must use HTTP or HTTPS"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields;

    const ORG: &str = "5f0c1f2e-8a51-4d61-9c0e-0b1d2a3c4e5f";

    #[test]
    fn live_clients_need_mfa() {
        let form = fields(&[("org_id", ORG), ("name", "POS")]);
        assert!(parse_api_client(&form, ApiEnv::Sandbox).unwrap().mfa_code.is_none());
        assert!(parse_api_client(&form, ApiEnv::Live).unwrap_err().contains("mfa_code"));

        let form = fields(&[("org_id", ORG), ("name", "POS"), ("mfa_code", "12a456")]);
        assert!(parse_api_client(&form, ApiEnv::Live).unwrap_err().contains("mfa_code"));

        let form = fields(&[("org_id", ORG), ("name", "POS"), ("mfa_code", "123456")]);
        assert_eq!(
            parse_api_client(&form, ApiEnv::Live).unwrap().mfa_code.as_deref(),
            Some("123456")
        );
    }

    #[test]
    fn malformed_org_is_a_field_error() {
        let errors = parse_api_client(&fields(&[("org_id", "nope"), ("name", "x")]), ApiEnv::Sandbox).unwrap_err();
        assert!(errors.contains("org_id"));
    }

    #[test]
    fn redirect_uri_rules() {
        assert!(validate_redirect_uri("https://partner.example/callback").is_ok());
        assert!(validate_redirect_uri("http://localhost:8080/cb").is_ok());
        assert!(validate_redirect_uri("http://partner.example/cb").is_err());
        assert!(validate_redirect_uri("ftp://partner.example/cb").is_err());
        assert!(validate_redirect_uri("https://partner.example/cb#frag").is_err());
        assert!(validate_redirect_uri("not a url").is_err());
    }

    #[test]
    fn oauth_client_collects_uris_and_scopes() {
        let form = parse_oauth_client(&fields(&[
            ("org_id", ORG),
            ("name", "Partner App"),
            ("redirect_uris", "https://a.example/cb\nhttps://b.example/cb"),
            ("scopes", "openid"),
            ("scopes", "remittance:read"),
            ("scopes", "openid"),
        ]))
        .unwrap();
        assert_eq!(form.redirect_uris.len(), 2);
        assert_eq!(form.scopes, vec!["openid", "remittance:read"]);

        let errors = parse_oauth_client(&fields(&[("org_id", ORG), ("name", "x"), ("scopes", "admin")])).unwrap_err();
        assert!(errors.contains("redirect_uris"));
        assert!(errors.contains("scopes"));
    }
}
