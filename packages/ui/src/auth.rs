//! Session gate: authentication context, hooks and sign-in/out buttons.

use api::CapsuleClient;
use dioxus::prelude::*;
use store::SessionState;

/// Everything components need to know about the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionGate {
    pub state: SessionState,
    /// Capsule API base URL, known once the user is signed in.
    pub api_base_url: Option<String>,
    /// Why the last sign-out did not go through; the user is still signed in.
    pub sign_out_error: Option<String>,
}

impl SessionGate {
    fn new(state: SessionState, api_base_url: Option<String>) -> Self {
        Self {
            state,
            api_base_url,
            sign_out_error: None,
        }
    }

    /// Apply the server's answer to a sign-out request.
    ///
    /// Local state is only cleared once the server session is gone; the
    /// returned URL is where the browser goes next. On failure the user stays
    /// signed in and the message is kept for display.
    pub fn finish_sign_out(&mut self, result: Result<String, String>) -> Option<String> {
        match result {
            Ok(logout_url) => {
                *self = Self::new(SessionState::Unauthenticated, None);
                Some(logout_url)
            }
            Err(message) => {
                self.sign_out_error = Some(message);
                None
            }
        }
    }

    /// A repository client for the signed-in user, if there is one.
    pub fn client(&self) -> Option<CapsuleClient> {
        let user = self.state.user()?;
        let base = self.api_base_url.as_deref()?;
        Some(CapsuleClient::for_user(base, user))
    }
}

/// Get the session gate.
/// Returns a signal that updates when the user signs in or out.
pub fn use_session() -> Signal<SessionGate> {
    use_context::<Signal<SessionGate>>()
}

/// Provider component that checks the session once on startup.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut gate = use_signal(SessionGate::default);

    let _ = use_resource(move || async move {
        let state = match api::get_session().await {
            Ok(snapshot) => SessionState::from_snapshot(snapshot),
            Err(e) => {
                tracing::error!("Failed to load session: {}", e);
                SessionState::Errored(e.to_string())
            }
        };

        if !state.is_authenticated() {
            gate.set(SessionGate::new(state, None));
            return;
        }

        match api::get_api_base_url().await {
            Ok(base) => gate.set(SessionGate::new(state, Some(base))),
            Err(e) => {
                tracing::error!("Failed to load API configuration: {}", e);
                gate.set(SessionGate::new(SessionState::Errored(e.to_string()), None));
            }
        }
    });

    use_context_provider(|| gate);

    rsx! {
        {children}
    }
}

/// Send the browser to `url`.
fn navigate_to(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("navigation to {} requested outside a browser", url);
    }
}

/// Button that starts the Cognito sign-in redirect.
#[component]
pub fn SignInButton(
    #[props(into, default = "Sign In".to_string())] label: String,
    #[props(into, default = "btn btn-primary".to_string())] class: String,
) -> Element {
    let mut gate = use_session();
    let mut loading = use_signal(|| false);

    let onclick = move |_| async move {
        loading.set(true);
        match api::get_login_url().await {
            // Redirect to Cognito
            Ok(url) => navigate_to(&url),
            Err(e) => {
                tracing::error!("Failed to get login URL: {}", e);
                gate.set(SessionGate::new(SessionState::Errored(e.to_string()), None));
                loading.set(false);
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Button to sign the current user out.
#[component]
pub fn SignOutButton(
    #[props(into, default = "Sign Out".to_string())] label: String,
    #[props(into, default = "btn btn-logout".to_string())] class: String,
) -> Element {
    let mut gate = use_session();
    let mut pending = use_signal(|| false);

    let onclick = move |_| async move {
        pending.set(true);
        let result = api::logout().await.map_err(|e| {
            tracing::error!("Failed to sign out: {}", e);
            format!("Sign out failed, you are still signed in: {e}")
        });
        let next = gate.write().finish_sign_out(result);
        match next {
            Some(url) => navigate_to(&url),
            None => pending.set(false),
        }
    };

    rsx! {
        button {
            class: "{class}",
            disabled: pending(),
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::SessionUser;

    fn signed_in() -> SessionGate {
        SessionGate::new(
            SessionState::Authenticated(SessionUser {
                email: "ada@example.com".into(),
                access_token: "token-1".into(),
                expires_at: None,
            }),
            Some("https://api.example.com/Prod".into()),
        )
    }

    #[test]
    fn test_sign_out_clears_state_after_server_confirms() {
        let mut gate = signed_in();
        let next = gate.finish_sign_out(Ok("https://auth.example.com/logout".into()));

        assert_eq!(next.as_deref(), Some("https://auth.example.com/logout"));
        assert_eq!(gate.state, SessionState::Unauthenticated);
        assert!(gate.api_base_url.is_none());
        assert!(gate.client().is_none());
    }

    #[test]
    fn test_failed_sign_out_keeps_user_signed_in() {
        let mut gate = signed_in();
        let next = gate.finish_sign_out(Err("server unreachable".into()));

        assert!(next.is_none());
        assert!(gate.state.is_authenticated());
        assert!(gate.client().is_some());
        assert_eq!(gate.sign_out_error.as_deref(), Some("server unreachable"));
    }

    #[test]
    fn test_retried_sign_out_clears_previous_error() {
        let mut gate = signed_in();
        gate.finish_sign_out(Err("server unreachable".into()));
        gate.finish_sign_out(Ok("https://auth.example.com/logout".into()));

        assert!(gate.sign_out_error.is_none());
    }
}
