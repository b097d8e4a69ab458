use dioxus::prelude::*;

use crate::vm::LeadModalVm;

use super::quiz::QuizIntent;

/// Intent for a key pressed while the overlay has focus.
#[must_use]
pub fn modal_key_intent(key: &Key) -> Option<QuizIntent> {
    (*key == Key::Escape).then_some(QuizIntent::CloseSignup)
}

#[component]
pub(super) fn LeadModal(
    modal: LeadModalVm,
    container_id: String,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    if modal == LeadModalVm::Hidden {
        return rsx! {};
    }

    rsx! {
        div {
            class: "lead-overlay",
            id: "lead-overlay",
            tabindex: "-1",
            // Focus moves here on open so Escape reaches the handler.
            onmounted: move |evt: MountedEvent| async move {
                if let Err(err) = evt.set_focus(true).await {
                    tracing::debug!(error = ?err, "could not focus lead overlay");
                }
            },
            onkeydown: move |evt: KeyboardEvent| {
                if let Some(intent) = modal_key_intent(&evt.key()) {
                    evt.prevent_default();
                    on_intent.call(intent);
                }
            },
            div {
                class: "lead-modal",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "lead-modal-title",
                header { class: "lead-modal__header",
                    h2 { class: "lead-modal__title", id: "lead-modal-title", "Join us at Re:Govern" }
                    button {
                        class: "lead-modal__close",
                        id: "lead-modal-close",
                        aria_label: "Close",
                        onclick: move |_| on_intent.call(QuizIntent::CloseSignup),
                        "×"
                    }
                }
                div { class: "lead-modal__body",
                    match &modal {
                        LeadModalVm::Loading => rsx! {
                            p { class: "lead-modal__placeholder", "Loading form..." }
                        },
                        LeadModalVm::Unavailable { fallback_url } => rsx! {
                            p { class: "lead-modal__placeholder",
                                "The signup form is unavailable right now. "
                                a {
                                    href: "{fallback_url}",
                                    target: "_blank",
                                    rel: "noopener noreferrer",
                                    "Sign up on the Re:Govern page"
                                }
                            }
                        },
                        LeadModalVm::Form | LeadModalVm::Hidden => rsx! {},
                    }
                    div { class: "lead-form", id: "{container_id}" }
                }
            }
        }
    }
}
