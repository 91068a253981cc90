//! # Capsule repository client
//!
//! A thin HTTP facade over the capsule REST API. Every call carries the
//! signed-in user's bearer token and is single shot: no retry and no timeout
//! beyond what the platform imposes.
//!
//! | Method | Request | Failure context |
//! |--------|---------|-----------------|
//! | [`list`](CapsuleClient::list) | `GET {base}/capsules` | `Failed to fetch capsules` |
//! | [`create`](CapsuleClient::create) | `POST {base}/capsules` | server `message`, else `Failed to create capsule` |
//! | [`open`](CapsuleClient::open) | `POST {base}/capsules/{id}/open` | `Failed to open capsule` |
//! | [`reopen`](CapsuleClient::reopen) | same as `open` | `Failed to reopen capsule` |
//!
//! `reopen` exists because the client keeps no copy of decrypted content: an
//! already opened capsule is opened again to display it.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use store::{Capsule, CapsuleInput, SessionUser};

use crate::error::ApiError;

/// What the client needs from the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: String,
    /// Default recipient for new capsules.
    pub email: String,
}

impl From<&SessionUser> for Credentials {
    fn from(user: &SessionUser) -> Self {
        Self {
            access_token: user.access_token.clone(),
            email: user.email.clone(),
        }
    }
}

/// Body of `POST /capsules`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCapsuleBody<'a> {
    title: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipient_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_date: Option<String>,
}

/// Error body the API may attach to a failed request.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CapsuleClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl CapsuleClient {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn for_user(base_url: impl Into<String>, user: &SessionUser) -> Self {
        Self::new(base_url, Credentials::from(user))
    }

    /// All capsules of the signed-in user.
    pub async fn list(&self) -> Result<Vec<Capsule>, ApiError> {
        let url = self.url(&["capsules"])?;
        let response = self
            .send(
                self.request(Method::GET, url)
                    .header(CONTENT_TYPE, "application/json"),
            )
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::network("Failed to fetch capsules", response.status()));
        }
        let capsules: Vec<Capsule> = decode(response).await?;
        tracing::debug!(count = capsules.len(), "fetched capsules");
        Ok(capsules)
    }

    /// Create a capsule. The recipient defaults to the signed-in user.
    pub async fn create(&self, input: &CapsuleInput) -> Result<Capsule, ApiError> {
        let url = self.url(&["capsules"])?;
        let recipient = input
            .recipient_email
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.credentials.email);
        let body = CreateCapsuleBody {
            title: &input.title,
            message: &input.message,
            recipient_email: (!recipient.is_empty()).then_some(recipient),
            delivery_date: input.delivery_date.map(|d| {
                d.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
            }),
        };

        let response = self.send(self.request(Method::POST, url).json(&body)).await?;
        let status = response.status();
        if !status.is_success() {
            let reported = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty());
            return Err(match reported {
                Some(message) => ApiError::Validation(message),
                None => ApiError::network("Failed to create capsule", status),
            });
        }
        let capsule: Capsule = decode(response).await?;
        tracing::info!(capsule_id = %capsule.capsule_id, "capsule created");
        Ok(capsule)
    }

    /// Open an active capsule, returning it with its plaintext.
    pub async fn open(&self, capsule_id: &str) -> Result<Capsule, ApiError> {
        self.post_open(capsule_id, "Failed to open capsule").await
    }

    /// Fetch the plaintext of an already opened capsule again.
    pub async fn reopen(&self, capsule_id: &str) -> Result<Capsule, ApiError> {
        self.post_open(capsule_id, "Failed to reopen capsule").await
    }

    async fn post_open(&self, capsule_id: &str, context: &'static str) -> Result<Capsule, ApiError> {
        let url = self.url(&["capsules", capsule_id, "open"])?;
        let response = self
            .send(
                self.request(Method::POST, url)
                    .header(CONTENT_TYPE, "application/json"),
            )
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::network(context, response.status()));
        }
        decode(response).await
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Transport(format!("Invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.credentials.access_token)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            tracing::warn!("capsule API unreachable: {e}");
            ApiError::Transport(e.to_string())
        })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
