use dioxus::prelude::*;
use store::{Capsule, CapsuleForm, DELIVERY_DATE_HINT};

use crate::auth::use_session;
use crate::capsule_list::report_api_error;

/// Inline form for creating a new capsule.
#[component]
pub fn CreateCapsuleForm(on_created: EventHandler<Capsule>, on_cancel: EventHandler<()>) -> Element {
    let gate = use_session();
    let mut form = use_signal(CapsuleForm::new);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();

        let prepared = form.peek().to_input();
        let input = match prepared {
            Ok(input) => input,
            Err(e) => {
                form.write().reject(&e);
                return;
            }
        };
        let Some(client) = gate.peek().client() else {
            tracing::warn!("capsule submitted without an active session");
            return;
        };
        if !form.write().begin_submit() {
            return;
        }

        spawn(async move {
            let result = client
                .create(&input)
                .await
                .map_err(|e| report_api_error("Creating capsule", e));
            form.write().finish_submit(&result);
            if let Ok(capsule) = result {
                tracing::info!(capsule_id = %capsule.capsule_id, "capsule created");
                on_created.call(capsule);
            }
        });
    };

    let current = form();
    let submitting = current.is_submitting();

    rsx! {
        div {
            class: "create-capsule-form",
            h2 { "Create New Time Capsule" }

            form {
                onsubmit: handle_submit,

                div {
                    class: "form-group",
                    label { r#for: "title", "Title *" }
                    input {
                        id: "title",
                        name: "title",
                        r#type: "text",
                        required: true,
                        placeholder: "Give your capsule a name",
                        value: "{current.title}",
                        oninput: move |evt: FormEvent| form.write().title = evt.value(),
                    }
                }

                div {
                    class: "form-group",
                    label { r#for: "message", "Message *" }
                    textarea {
                        id: "message",
                        name: "message",
                        required: true,
                        rows: "6",
                        placeholder: "Write a message to your future self...",
                        value: "{current.message}",
                        oninput: move |evt: FormEvent| form.write().message = evt.value(),
                    }
                }

                div {
                    class: "form-group",
                    label { r#for: "deliveryDate", "Schedule Delivery (Optional)" }
                    input {
                        id: "deliveryDate",
                        name: "deliveryDate",
                        r#type: "datetime-local",
                        value: "{current.delivery_date}",
                        oninput: move |evt: FormEvent| form.write().delivery_date = evt.value(),
                    }
                    small { "Leave empty for immediate delivery" }
                }

                div {
                    class: "form-group",
                    label { r#for: "recipientEmail", "Recipient Email (Optional)" }
                    input {
                        id: "recipientEmail",
                        name: "recipientEmail",
                        r#type: "email",
                        placeholder: "Defaults to your own email",
                        value: "{current.recipient_email}",
                        oninput: move |evt: FormEvent| form.write().recipient_email = evt.value(),
                    }
                }

                if let Some(err) = current.error() {
                    div {
                        class: "error-message",
                        p { "Error: {err}" }
                        p { class: "error-hint", "{DELIVERY_DATE_HINT}" }
                    }
                }

                div {
                    class: "form-actions",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: submitting,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: submitting,
                        if submitting {
                            "Creating..."
                        } else {
                            "Create Time Capsule"
                        }
                    }
                }
            }
        }
    }
}
