use dioxus::prelude::*;
use store::SessionState;

use crate::auth::use_session;
use crate::CapsuleList;

use super::{AppShell, LandingView, LoadingView, SignInErrorView};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top-level screen for a session state.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Loading,
    SignInError(String),
    /// The signed-in app, inside the header/footer shell.
    Capsules { email: String },
    /// Signed-out landing page, with its own header and footer.
    Landing,
}

impl Screen {
    fn for_state(state: &SessionState) -> Self {
        match state {
            SessionState::Loading => Screen::Loading,
            SessionState::Errored(message) => Screen::SignInError(message.clone()),
            SessionState::Authenticated(user) => Screen::Capsules {
                email: user.email.clone(),
            },
            SessionState::Unauthenticated => Screen::Landing,
        }
    }
}

/// Picks what to show from the session state.
#[component]
pub fn HomeView() -> Element {
    let gate = use_session();
    let screen = Screen::for_state(&gate.read().state);

    let body = match screen {
        Screen::Loading => rsx! { LoadingView {} },
        Screen::SignInError(message) => rsx! { SignInErrorView { message } },
        Screen::Capsules { email } => rsx! {
            AppShell {
                email,
                CapsuleList {}
            }
        },
        Screen::Landing => rsx! { LandingView {} },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        {body}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::SessionUser;

    #[test]
    fn test_signed_out_visitors_get_the_landing_page() {
        assert_eq!(Screen::for_state(&SessionState::Unauthenticated), Screen::Landing);
        assert_eq!(Screen::for_state(&SessionState::Loading), Screen::Loading);
    }

    #[test]
    fn test_signed_in_user_gets_the_shell() {
        let state = SessionState::Authenticated(SessionUser {
            email: "ada@example.com".into(),
            access_token: "token-1".into(),
            expires_at: None,
        });
        assert_eq!(
            Screen::for_state(&state),
            Screen::Capsules {
                email: "ada@example.com".into()
            }
        );
    }

    #[test]
    fn test_sign_in_error_is_shown_verbatim() {
        let state = SessionState::Errored("Token exchange failed: invalid_grant".into());
        assert_eq!(
            Screen::for_state(&state),
            Screen::SignInError("Token exchange failed: invalid_grant".into())
        );
    }
}
