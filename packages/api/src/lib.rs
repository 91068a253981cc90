//! # API crate: remote calls and server functions for Time Capsule
//!
//! This crate holds everything that talks to something outside the browser:
//! the capsule REST API, the Cognito hosted UI, and the Dioxus server functions
//! the frontend calls for session handling.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`client`] | none | [`CapsuleClient`]: list, create, open and reopen capsules with a bearer token |
//! | [`config`] | none | [`AppConfig`] from environment variables, identity provider endpoints, logout URL |
//! | [`error`] | none | [`ApiError`] and [`AuthError`] |
//! | [`auth`] | `server` | Cognito authorization code + PKCE flow, session keys |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - **Session**: `get_session`, `get_login_url`, `logout`
//! - **Configuration**: `get_api_base_url`

use dioxus::prelude::*;

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use client::{CapsuleClient, Credentials};
pub use config::{AppConfig, ConfigError, OidcEndpoints};
pub use error::{ApiError, AuthError};
pub use store::{Capsule, CapsuleInput, CapsuleStatus, SessionSnapshot, SessionUser};

/// Report the current browser session: the signed-in user and any pending
/// sign-in error. An expired user is dropped from the session.
#[cfg(feature = "server")]
#[get("/api/session", session: tower_sessions::Session)]
pub async fn get_session() -> Result<SessionSnapshot, ServerFnError> {
    auth::read_snapshot(&session, chrono::Utc::now())
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/session")]
pub async fn get_session() -> Result<SessionSnapshot, ServerFnError> {
    Ok(SessionSnapshot::default())
}

/// Start a sign-in: returns the Cognito authorization URL to navigate to.
#[cfg(feature = "server")]
#[get("/api/auth/login", session: tower_sessions::Session)]
pub async fn get_login_url() -> Result<String, ServerFnError> {
    let config = config::get_config()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let (url, pending) = auth::CognitoOAuth::new(config)
        .generate_auth_url()
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .remove::<String>(auth::SESSION_AUTH_ERROR_KEY)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    session
        .insert(auth::SESSION_PENDING_LOGIN_KEY, pending)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(url)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/login")]
pub async fn get_login_url() -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out: clears the session and returns the Cognito logout URL.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<String, ServerFnError> {
    let config = config::get_config()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    config
        .logout_url()
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Base URL of the capsule API the browser should call.
#[cfg(feature = "server")]
#[get("/api/config/api-base")]
pub async fn get_api_base_url() -> Result<String, ServerFnError> {
    let config = config::get_config()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(config.api_base_url.clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config/api-base")]
pub async fn get_api_base_url() -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
