//! Session keys and the data kept in the browser session.

use serde::{Deserialize, Serialize};

/// Key for the signed-in [`store::SessionUser`].
pub const SESSION_USER_KEY: &str = "user";

/// Key for the message of a failed sign-in, cleared on the next attempt.
pub const SESSION_AUTH_ERROR_KEY: &str = "auth_error";

/// Key for the [`PendingLogin`] between redirect and callback.
pub const SESSION_PENDING_LOGIN_KEY: &str = "pending_login";

/// CSRF state and PKCE verifier of a sign-in that has been redirected to
/// Cognito but not yet completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    pub csrf_state: String,
    pub pkce_verifier: String,
}
