use api::{ApiError, CapsuleClient};
use dioxus::prelude::*;
use store::format::format_short;
use store::{Capsule, CapsuleListState, FetchTicket, ListPhase};

use crate::auth::use_session;
use crate::capsule_modal::CapsuleModal;
use crate::create_capsule::CreateCapsuleForm;

/// Log a failed capsule call and turn it into the message shown inline.
pub(crate) fn report_api_error(action: &str, error: ApiError) -> String {
    if error.is_unauthorized() {
        tracing::warn!("{} rejected the access token, sign in again: {}", action, error);
    } else {
        tracing::error!("{} failed: {}", action, error);
    }
    error.to_string()
}

/// Run one list fetch and commit it if no newer fetch has started.
fn run_fetch(mut list: Signal<CapsuleListState>, ticket: FetchTicket, client: CapsuleClient) {
    spawn(async move {
        let result = client
            .list()
            .await
            .map_err(|e| report_api_error("Fetching capsules", e));
        if !list.write().finish_fetch(ticket, result) {
            tracing::debug!(generation = ticket.generation(), "dropped stale capsule list");
        }
    });
}

/// The signed-in user's capsules, with the creation form and detail modal.
#[component]
pub fn CapsuleList() -> Element {
    let gate = use_session();
    let mut list = use_signal(CapsuleListState::new);

    // Refetch whenever the signed-in user's token changes.
    let access_token = use_memo(move || gate.read().state.access_token().map(str::to_string));
    use_effect(move || {
        if access_token().is_none() {
            return;
        }
        let Some(client) = gate.peek().client() else {
            return;
        };
        let ticket = list.write().begin_fetch();
        run_fetch(list, ticket, client);
    });

    let open_capsule = move |capsule_id: String| {
        if let Err(e) = list.peek().open_capsule(&capsule_id) {
            tracing::warn!("{}", e);
            return;
        }
        let Some(client) = gate.peek().client() else {
            return;
        };
        spawn(async move {
            let result = client
                .open(&capsule_id)
                .await
                .map_err(|e| report_api_error("Opening capsule", e));
            list.write().finish_open(&capsule_id, result);
        });
    };

    let view_capsule = move |capsule: Capsule| {
        let capsule_id = match list.peek().view_capsule(&capsule) {
            Ok(id) => id.to_string(),
            Err(e) => {
                tracing::warn!("{}", e);
                return;
            }
        };
        let Some(client) = gate.peek().client() else {
            return;
        };
        spawn(async move {
            let result = client
                .reopen(&capsule_id)
                .await
                .map_err(|e| report_api_error("Reopening capsule", e));
            list.write().finish_view(result);
        });
    };

    let on_created = move |_: Capsule| {
        let ticket = list.write().capsule_created();
        match gate.peek().client() {
            Some(client) => run_fetch(list, ticket, client),
            None => tracing::warn!("capsule created without an active session"),
        }
    };

    let state = list();

    match state.phase() {
        ListPhase::Loading => {
            return rsx! {
                div { class: "loading", "Loading your capsules..." }
            }
        }
        ListPhase::Errored(message) => {
            return rsx! {
                div { class: "error", "Error: {message}" }
            }
        }
        ListPhase::Loaded => {}
    }

    rsx! {
        div {
            class: "capsule-list",
            div {
                class: "list-header",
                h2 { "Your Time Capsules" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| list.write().show_create_form(),
                    "+ Create New Capsule"
                }
            }

            if let Some(err) = state.action_error() {
                div { class: "error-message", "Error: {err}" }
            }

            if state.create_form_visible() {
                CreateCapsuleForm {
                    on_created: on_created,
                    on_cancel: move |_| list.write().hide_create_form(),
                }
            }

            if state.capsules().is_empty() {
                div {
                    class: "empty-state",
                    p { "You don't have any time capsules yet." }
                    p { "Create your first one to get started!" }
                }
            } else {
                div {
                    class: "capsules-grid",
                    for capsule in state.capsules().iter().cloned() {
                        CapsuleCard {
                            key: "{capsule.capsule_id}",
                            capsule: capsule,
                            on_open: open_capsule,
                            on_view: view_capsule,
                        }
                    }
                }
            }

            if let Some(selected) = state.selected().cloned() {
                CapsuleModal {
                    capsule: selected,
                    on_close: move |_| list.write().close_modal(),
                }
            }
        }
    }
}

/// One capsule in the grid.
#[component]
fn CapsuleCard(capsule: Capsule, on_open: EventHandler<String>, on_view: EventHandler<Capsule>) -> Element {
    let created = format_short(&capsule.created_date);
    let scheduled = capsule.delivery_date.as_deref().map(format_short);
    let status = capsule.status;
    let status_class = format!("status-{}", status.css_class());
    let opened = capsule.is_opened();
    let capsule_id = capsule.capsule_id.clone();
    let viewed = capsule.clone();

    rsx! {
        div {
            class: "capsule-card",
            h3 { "{capsule.title}" }
            p { class: "capsule-date", "Created: {created}" }
            p {
                class: "capsule-status",
                "Status: "
                span { class: "{status_class}", "{status}" }
            }
            if let Some(scheduled) = scheduled {
                p { class: "capsule-date", "Scheduled for: {scheduled}" }
            }
            if opened {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_view.call(viewed.clone()),
                    "View Details"
                }
            } else {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_open.call(capsule_id.clone()),
                    "Open Now"
                }
            }
        }
    }
}
