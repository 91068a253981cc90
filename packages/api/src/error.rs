//! Error types for remote calls.
//!
//! [`ApiError`] covers the capsule API, [`AuthError`] the sign-in flow against
//! Cognito. Their `Display` output is what ends up on screen, so the messages
//! are written for users.

use thiserror::Error;

/// Failure of a capsule API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The API answered with a non-2xx status.
    #[error("{context}: {status} {reason}")]
    Network {
        context: &'static str,
        status: u16,
        reason: String,
    },
    /// The API rejected the input and said why.
    #[error("{0}")]
    Validation(String),
    /// The request never got an answer.
    #[error("{0}")]
    Transport(String),
    /// A 2xx answer whose body was not what we expected.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn network(context: &'static str, status: reqwest::StatusCode) -> Self {
        ApiError::Network {
            context,
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// HTTP status, if the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The API refused the bearer token, usually because it expired.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

/// Failure of the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Sign-in is misconfigured: {0}")]
    Config(String),
    /// Cognito redirected back with an `error` instead of a code.
    #[error("Sign-in was refused: {0}")]
    Provider(String),
    #[error("Sign-in request expired or was tampered with, please try again")]
    InvalidState,
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),
    #[error("Could not load your profile: {0}")]
    UserInfo(String),
    #[error("Session error: {0}")]
    Session(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_message() {
        let err = ApiError::network("Failed to fetch capsules", reqwest::StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Failed to fetch capsules: 404 Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_rejected_token_is_unauthorized() {
        let err = ApiError::network("Failed to open capsule", reqwest::StatusCode::UNAUTHORIZED);
        assert!(err.is_unauthorized());
        assert!(!ApiError::Transport("connection refused".into()).is_unauthorized());
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = ApiError::Validation("Delivery date must be in the future".into());
        assert_eq!(err.to_string(), "Delivery date must be in the future");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_provider_refusal_message() {
        let err = AuthError::Provider("User cancelled".into());
        assert_eq!(err.to_string(), "Sign-in was refused: User cancelled");
    }
}
