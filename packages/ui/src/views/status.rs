use dioxus::prelude::*;

use crate::auth::SignInButton;

/// Shown while the session is being checked.
#[component]
pub fn LoadingView() -> Element {
    rsx! {
        div {
            class: "loading-screen",
            div { class: "spinner" }
            p { "Loading Time Capsule..." }
        }
    }
}

/// Shown when sign-in failed, with a way to retry.
#[component]
pub fn SignInErrorView(message: String) -> Element {
    rsx! {
        div {
            class: "error-screen",
            h2 { "Oops! Something went wrong" }
            p { class: "error-detail", "{message}" }
            SignInButton { label: "Try Sign In Again" }
        }
    }
}
