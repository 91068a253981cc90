use dioxus::prelude::*;

use crate::auth::{use_session, SignOutButton};

/// Header, content area and footer around the signed-in app.
#[component]
pub fn AppShell(email: String, children: Element) -> Element {
    let gate = use_session();
    let sign_out_error = gate.read().sign_out_error.clone();

    rsx! {
        div {
            class: "app",
            header {
                class: "app-header",
                h1 { "⏰ Time Capsule" }
                div {
                    class: "user-info",
                    span { "Welcome, {email}" }
                    SignOutButton {}
                }
            }
            if let Some(err) = sign_out_error {
                div { class: "error-message sign-out-error", "{err}" }
            }
            main {
                class: "app-main",
                {children}
            }
            footer {
                class: "app-footer",
                p { "© 2025 Time Capsule. Preserve your memories for the future." }
            }
        }
    }
}
