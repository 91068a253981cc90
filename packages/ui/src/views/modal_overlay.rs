use dioxus::prelude::*;

/// Class list for the modal card: the base class plus any extra ones.
fn card_class(extra: &str) -> String {
    match extra.trim() {
        "" => "modal-content".to_string(),
        extra => format!("modal-content {extra}"),
    }
}

/// A full-screen dialog that centers its children in a card.
///
/// Clicking the backdrop triggers `on_close`; clicks inside the card stop
/// there. `class` is appended to the card, `label` names the dialog for
/// screen readers.
#[component]
pub fn ModalOverlay(
    on_close: EventHandler<()>,
    #[props(into, default)] class: String,
    #[props(into, default)] label: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: card_class(&class),
                role: "dialog",
                aria_modal: "true",
                aria_label: "{label}",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}
