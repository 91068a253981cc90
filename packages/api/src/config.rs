//! # Application configuration from environment variables
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `API_BASE_URL` | Base URL of the capsule REST API, e.g. `https://…/Prod` |
//! | `CLIENT_ID` | Cognito app client id |
//! | `COGNITO_DOMAIN` | Hosted UI domain, e.g. `https://myapp.auth.us-east-2.amazoncognito.com` |
//! | `REDIRECT_URI` | Where Cognito sends the authorization code (our `/auth/callback`) |
//! | `LOGOUT_REDIRECT_URI` | Where Cognito sends the browser after logout |
//! | `COGNITO_ISSUER` | Optional user pool issuer, `https://cognito-idp.<region>.amazonaws.com/<pool>` |
//!
//! The identity provider endpoints are derived from the domain and issuer
//! instead of being discovered, so sign-in needs no discovery round trip.
//!
//! On the server the values are read once (after loading `.env` with
//! `dotenvy`) and cached for the life of the process, see [`get_config`].

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub client_id: String,
    pub cognito_domain: String,
    pub redirect_uri: String,
    pub logout_redirect_uri: String,
    pub issuer: Option<String>,
}

/// Identity provider endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcEndpoints {
    pub authorize: String,
    pub token: String,
    pub userinfo: String,
    pub end_session: String,
    pub issuer: Option<String>,
    pub jwks_uri: Option<String>,
}

impl AppConfig {
    /// Build from any key lookup; the server passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let url = |key: &'static str| -> Result<String, ConfigError> {
            let value = required(key)?;
            Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
                key,
                reason: e.to_string(),
            })?;
            Ok(value)
        };

        let issuer = match lookup("COGNITO_ISSUER").filter(|v| !v.trim().is_empty()) {
            Some(_) => Some(url("COGNITO_ISSUER")?.trim_end_matches('/').to_string()),
            None => None,
        };

        Ok(Self {
            api_base_url: url("API_BASE_URL")?.trim_end_matches('/').to_string(),
            client_id: required("CLIENT_ID")?,
            cognito_domain: url("COGNITO_DOMAIN")?.trim_end_matches('/').to_string(),
            redirect_uri: url("REDIRECT_URI")?,
            logout_redirect_uri: url("LOGOUT_REDIRECT_URI")?,
            issuer,
        })
    }

    /// Read from the process environment, loading `.env` first.
    #[cfg(feature = "server")]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn endpoints(&self) -> OidcEndpoints {
        let domain = &self.cognito_domain;
        OidcEndpoints {
            authorize: format!("{domain}/oauth2/authorize"),
            token: format!("{domain}/oauth2/token"),
            userinfo: format!("{domain}/oauth2/userInfo"),
            end_session: format!("{domain}/logout"),
            jwks_uri: self
                .issuer
                .as_ref()
                .map(|iss| format!("{iss}/.well-known/jwks.json")),
            issuer: self.issuer.clone(),
        }
    }

    /// `{domain}/logout?client_id=…&logout_uri=…` with the redirect URL-encoded.
    pub fn logout_url(&self) -> Result<String, ConfigError> {
        let url = Url::parse_with_params(
            &self.endpoints().end_session,
            [
                ("client_id", self.client_id.as_str()),
                ("logout_uri", self.logout_redirect_uri.as_str()),
            ],
        )
        .map_err(|e| ConfigError::InvalidUrl {
            key: "COGNITO_DOMAIN",
            reason: e.to_string(),
        })?;
        Ok(url.into())
    }
}

#[cfg(feature = "server")]
static CONFIG: tokio::sync::OnceCell<AppConfig> = tokio::sync::OnceCell::const_new();

/// Get or load the process-wide configuration.
#[cfg(feature = "server")]
pub async fn get_config() -> Result<&'static AppConfig, ConfigError> {
    CONFIG
        .get_or_try_init(|| async {
            let config = AppConfig::from_env()?;
            let endpoints = config.endpoints();
            tracing::info!(
                authorize = %endpoints.authorize,
                issuer = ?endpoints.issuer,
                jwks = ?endpoints.jwks_uri,
                "identity provider configured without discovery"
            );
            Ok::<_, ConfigError>(config)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("API_BASE_URL", "https://api.example.com/Prod/"),
            ("CLIENT_ID", "abc123"),
            (
                "COGNITO_DOMAIN",
                "https://capsule.auth.us-east-2.amazoncognito.com/",
            ),
            ("REDIRECT_URI", "http://localhost:8080/auth/callback"),
            ("LOGOUT_REDIRECT_URI", "http://localhost:8080/"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_loads_and_trims() {
        let config = load(&env()).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/Prod");
        assert_eq!(
            config.cognito_domain,
            "https://capsule.auth.us-east-2.amazoncognito.com"
        );
        assert!(config.issuer.is_none());
    }

    #[test]
    fn test_missing_key() {
        let mut vars = env();
        vars.remove("CLIENT_ID");
        assert_eq!(load(&vars), Err(ConfigError::Missing("CLIENT_ID")));

        let mut vars = env();
        vars.insert("REDIRECT_URI", "   ");
        assert_eq!(load(&vars), Err(ConfigError::Missing("REDIRECT_URI")));
    }

    #[test]
    fn test_invalid_url() {
        let mut vars = env();
        vars.insert("API_BASE_URL", "not a url");
        assert!(matches!(
            load(&vars),
            Err(ConfigError::InvalidUrl {
                key: "API_BASE_URL",
                ..
            })
        ));
    }

    #[test]
    fn test_endpoints_derived_from_domain() {
        let mut vars = env();
        vars.insert(
            "COGNITO_ISSUER",
            "https://cognito-idp.us-east-2.amazonaws.com/us-east-2_pool",
        );
        let endpoints = load(&vars).unwrap().endpoints();
        assert_eq!(
            endpoints.token,
            "https://capsule.auth.us-east-2.amazoncognito.com/oauth2/token"
        );
        assert_eq!(
            endpoints.userinfo,
            "https://capsule.auth.us-east-2.amazoncognito.com/oauth2/userInfo"
        );
        assert_eq!(
            endpoints.jwks_uri.as_deref(),
            Some("https://cognito-idp.us-east-2.amazonaws.com/us-east-2_pool/.well-known/jwks.json")
        );
    }

    #[test]
    fn test_logout_url() {
        let config = load(&env()).unwrap();
        assert_eq!(
            config.logout_url().unwrap(),
            "https://capsule.auth.us-east-2.amazoncognito.com/logout?client_id=abc123&logout_uri=http%3A%2F%2Flocalhost%3A8080%2F"
        );
    }
}
