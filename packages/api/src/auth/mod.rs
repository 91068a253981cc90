//! Authentication against the Cognito hosted UI.

#[cfg(feature = "server")]
mod cognito;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use cognito::CognitoOAuth;
#[cfg(feature = "server")]
pub use session::{
    PendingLogin, SESSION_AUTH_ERROR_KEY, SESSION_PENDING_LOGIN_KEY, SESSION_USER_KEY,
};

/// Finish a sign-in from the callback's `code` and `state`.
///
/// On success the user is stored in the session; on failure the message is
/// stored instead so the session gate can show it. The pending login is
/// consumed either way.
#[cfg(feature = "server")]
pub async fn complete_login(
    session: &tower_sessions::Session,
    code: &str,
    state: &str,
) -> Result<store::SessionUser, crate::AuthError> {
    use crate::AuthError;

    let result = async {
        let pending: PendingLogin = session
            .remove(SESSION_PENDING_LOGIN_KEY)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?
            .ok_or(AuthError::InvalidState)?;
        let config = crate::config::get_config()
            .await
            .map_err(|e| AuthError::Config(e.to_string()))?;
        let user = CognitoOAuth::new(config)
            .exchange_code(code, state, pending)
            .await?;
        session
            .insert(SESSION_USER_KEY, &user)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;
        Ok::<_, AuthError>(user)
    }
    .await;

    if let Err(e) = &result {
        fail_login(session, e).await;
    }
    result
}

/// Record a sign-in failure for the session gate to display.
#[cfg(feature = "server")]
pub async fn fail_login(session: &tower_sessions::Session, error: &crate::AuthError) {
    tracing::error!("Cognito sign-in failed: {}", error);
    if let Err(e) = session
        .insert(SESSION_AUTH_ERROR_KEY, error.to_string())
        .await
    {
        tracing::error!("Failed to store sign-in error: {}", e);
    }
}

/// Read the user and pending sign-in error from the session.
/// A user whose token expired before `now` is removed and not reported.
#[cfg(feature = "server")]
pub async fn read_snapshot(
    session: &tower_sessions::Session,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<store::SessionSnapshot, crate::AuthError> {
    use crate::AuthError;
    use store::{SessionSnapshot, SessionUser};

    let user: Option<SessionUser> = session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;
    let error: Option<String> = session
        .get(SESSION_AUTH_ERROR_KEY)
        .await
        .map_err(|e| AuthError::Session(e.to_string()))?;

    let user = match user {
        Some(u) if u.is_expired_at(now) => {
            tracing::info!(email = %u.email, "session token expired, signing out");
            session
                .remove::<SessionUser>(SESSION_USER_KEY)
                .await
                .map_err(|e| AuthError::Session(e.to_string()))?;
            None
        }
        other => other,
    };

    Ok(SessionSnapshot { user, error })
}
