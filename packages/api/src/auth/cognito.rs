//! # Cognito OAuth 2.0 implementation
//!
//! Authorization Code flow with PKCE against the Cognito hosted UI. Cognito
//! app clients used by browser apps are public, so no client secret is sent.
//!
//! ## Flow
//!
//! 1. **[`generate_auth_url`](CognitoOAuth::generate_auth_url)** builds an
//!    authorization URL for the `openid`, `email` and `profile` scopes with a
//!    random PKCE challenge and CSRF state. The caller keeps the returned
//!    [`PendingLogin`] in the browser session.
//!
//! 2. **[`exchange_code`](CognitoOAuth::exchange_code)** is called by the
//!    `/auth/callback` route in the `web` crate. It:
//!    - checks the returned `state` against the pending login,
//!    - exchanges the code and PKCE verifier for an access token,
//!    - fetches the email from the userinfo endpoint,
//!    - returns the [`SessionUser`] to store in the session.

use chrono::Utc;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use reqwest::Client;
use serde::Deserialize;
use store::SessionUser;

use super::session::PendingLogin;
use crate::config::AppConfig;
use crate::error::AuthError;

/// Cognito userinfo response.
#[derive(Debug, Deserialize)]
struct CognitoUser {
    email: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Cognito OAuth handler.
pub struct CognitoOAuth<'a> {
    config: &'a AppConfig,
}

impl<'a> CognitoOAuth<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    fn create_client(&self) -> Result<ConfiguredClient, AuthError> {
        let endpoints = self.config.endpoints();
        let auth_url =
            AuthUrl::new(endpoints.authorize).map_err(|e| AuthError::Config(e.to_string()))?;
        let token_url =
            TokenUrl::new(endpoints.token).map_err(|e| AuthError::Config(e.to_string()))?;
        let redirect_url = RedirectUrl::new(self.config.redirect_uri.clone())
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(BasicClient::new(ClientId::new(self.config.client_id.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url))
    }

    /// Generate authorization URL with PKCE.
    pub fn generate_auth_url(&self) -> Result<(String, PendingLogin), AuthError> {
        let client = self.create_client()?;
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingLogin {
            csrf_state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        };
        Ok((auth_url.to_string(), pending))
    }

    /// Exchange authorization code for tokens and get user info.
    pub async fn exchange_code(
        &self,
        code: &str,
        state: &str,
        pending: PendingLogin,
    ) -> Result<SessionUser, AuthError> {
        if pending.csrf_state != state {
            return Err(AuthError::InvalidState);
        }

        // Create HTTP client for token exchange
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let client = self.create_client()?;

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let access_token = token_result.access_token().secret().clone();
        let expires_at = token_result
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        let profile: CognitoUser = Client::new()
            .get(self.config.endpoints().userinfo)
            .bearer_auth(&access_token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::UserInfo(e.to_string()))?
            .json()
            .await
            .map_err(|e| AuthError::UserInfo(e.to_string()))?;

        let email = profile
            .email
            .ok_or_else(|| AuthError::UserInfo("profile has no email".to_string()))?;

        Ok(SessionUser {
            email,
            access_token,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            api_base_url: "https://api.example.com/Prod".into(),
            client_id: "abc123".into(),
            cognito_domain: "https://capsule.auth.us-east-2.amazoncognito.com".into(),
            redirect_uri: "http://localhost:8080/auth/callback".into(),
            logout_redirect_uri: "http://localhost:8080/".into(),
            issuer: None,
        }
    }

    #[test]
    fn test_auth_url_carries_pkce_and_scopes() {
        let config = config();
        let (url, pending) = CognitoOAuth::new(&config).generate_auth_url().unwrap();
        let url = reqwest::Url::parse(&url).unwrap();
        assert_eq!(url.path(), "/oauth2/authorize");

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "abc123");
        assert_eq!(params["redirect_uri"], "http://localhost:8080/auth/callback");
        assert_eq!(params["scope"], "openid email profile");
        assert_eq!(params["code_challenge_method"], "S256");
        assert_eq!(params["state"], pending.csrf_state);
        assert!(!pending.pkce_verifier.is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_state_is_rejected() {
        let config = config();
        let oauth = CognitoOAuth::new(&config);
        let (_, pending) = oauth.generate_auth_url().unwrap();
        let err = oauth
            .exchange_code("code", "forged", pending)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidState);
    }
}
