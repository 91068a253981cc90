//! Session state shared between the server functions and the UI.
//!
//! The server keeps a [`SessionUser`] in the browser's session after a
//! successful sign-in and reports it, together with any pending sign-in
//! error, as a [`SessionSnapshot`]. The UI folds the snapshot into a
//! [`SessionState`], which is what every component renders from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as far as the client needs to know.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Profile email from the identity provider.
    pub email: String,
    /// Bearer token for the capsule API.
    pub access_token: String,
    /// When the access token stops being accepted, if the provider said so.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionUser {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// What the server reports about the current browser session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<SessionUser>,
    /// Message from a failed sign-in attempt, shown until the next attempt.
    pub error: Option<String>,
}

/// Observable state of the session gate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Initial session check in flight.
    #[default]
    Loading,
    /// Sign-in or session lookup failed; the user may retry.
    Errored(String),
    Authenticated(SessionUser),
    Unauthenticated,
}

impl SessionState {
    /// Fold a server snapshot into a state. A pending error wins over a user.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        match snapshot {
            SessionSnapshot {
                error: Some(message),
                ..
            } => SessionState::Errored(message),
            SessionSnapshot {
                user: Some(user), ..
            } => SessionState::Authenticated(user),
            _ => SessionState::Unauthenticated,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Errored(message) => Some(message),
            _ => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.user().map(|u| u.access_token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> SessionUser {
        SessionUser {
            email: "me@example.com".into(),
            access_token: "tok".into(),
            expires_at: None,
        }
    }

    #[test]
    fn test_default_is_loading() {
        assert!(SessionState::default().is_loading());
    }

    #[test]
    fn test_snapshot_with_user_is_authenticated() {
        let state = SessionState::from_snapshot(SessionSnapshot {
            user: Some(user()),
            error: None,
        });
        assert!(state.is_authenticated());
        assert_eq!(state.access_token(), Some("tok"));
    }

    #[test]
    fn test_error_wins_over_user() {
        let state = SessionState::from_snapshot(SessionSnapshot {
            user: Some(user()),
            error: Some("Token exchange failed".into()),
        });
        assert_eq!(state.error(), Some("Token exchange failed"));
        assert!(state.user().is_none());
    }

    #[test]
    fn test_empty_snapshot_is_unauthenticated() {
        let state = SessionState::from_snapshot(SessionSnapshot::default());
        assert_eq!(state, SessionState::Unauthenticated);
        assert!(state.access_token().is_none());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let mut u = user();
        assert!(!u.is_expired_at(now));
        u.expires_at = Some(now - Duration::seconds(1));
        assert!(u.is_expired_at(now));
        u.expires_at = Some(now + Duration::minutes(5));
        assert!(!u.is_expired_at(now));
    }
}
