use dioxus::prelude::*;
use store::{Capsule, CapsuleDetails};

use crate::views::ModalOverlay;

/// Full view of an opened capsule.
#[component]
pub fn CapsuleModal(capsule: Capsule, on_close: EventHandler<()>) -> Element {
    let details = CapsuleDetails::from(&capsule);

    rsx! {
        ModalOverlay {
            on_close: on_close,
            class: "capsule-modal",
            label: details.title.clone(),
            button {
                class: "modal-close",
                onclick: move |_| on_close.call(()),
                "×"
            }
            h2 { "{details.title}" }

            div {
                class: "capsule-details",
                p {
                    strong { "Created: " }
                    "{details.created}"
                }
                if let Some(scheduled) = details.originally_scheduled.as_ref() {
                    p {
                        strong { "Originally Scheduled For: " }
                        "{scheduled}"
                    }
                }
                p {
                    strong { "Status: " }
                    span { class: "status-opened", "{details.status}" }
                }
                if let Some(recipient) = details.recipient.as_ref() {
                    p {
                        strong { "Recipient: " }
                        "{recipient}"
                    }
                }
            }

            div {
                class: "capsule-message",
                h3 { "Your Message:" }
                div { class: "message-content", "{details.message}" }
            }

            div {
                class: "modal-actions",
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }
        }
    }
}
