use dioxus::prelude::*;

use crate::auth::SignInButton;

/// Signed-out landing page with the sign-in call to action.
#[component]
pub fn LandingView() -> Element {
    rsx! {
        div {
            class: "app landing-page",
            header {
                class: "landing-header",
                h1 { "⏰ Time Capsule" }
            }
            div {
                class: "hero",
                h2 { "Preserve Your Memories for the Future" }
                p { class: "tagline", "Write letters to your future self, share memories with loved ones, and schedule them to open when the time is right." }
            }

            div {
                class: "features",
                Feature {
                    icon: "🔒",
                    title: "Secure Storage",
                    body: "Your messages are encrypted and stored safely until it is time to open them.",
                }
                Feature {
                    icon: "📅",
                    title: "Scheduled Delivery",
                    body: "Pick a date and your capsule unlocks exactly when you want it to.",
                }
                Feature {
                    icon: "📧",
                    title: "Email Notifications",
                    body: "Recipients get an email the moment their capsule is ready.",
                }
            }

            div {
                class: "cta",
                SignInButton {
                    label: "🔐 Get Started - Sign In / Sign Up",
                    class: "btn btn-primary btn-large",
                }
            }

            footer {
                class: "landing-footer",
                p { class: "auth-note", "Secure authentication powered by AWS Cognito" }
            }
        }
    }
}

#[component]
fn Feature(icon: &'static str, title: &'static str, body: &'static str) -> Element {
    rsx! {
        div {
            class: "feature",
            span { class: "feature-icon", "{icon}" }
            h3 { "{title}" }
            p { "{body}" }
        }
    }
}
