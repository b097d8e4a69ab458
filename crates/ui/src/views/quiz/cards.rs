use dioxus::prelude::*;

use quiz_core::model::CardChoice;

use crate::vm::{CardVm, MatchVm};

use super::quiz::QuizIntent;

/// Heading level of a match title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TitleLevel {
    /// The revealed result.
    Primary,
    /// A card under review.
    Secondary,
}

#[component]
pub(super) fn MatchBody(entry: MatchVm, level: TitleLevel) -> Element {
    rsx! {
        div { class: "match__emoji", "{entry.emoji}" }
        match level {
            TitleLevel::Primary => rsx! { h2 { class: "match__title", "{entry.title}" } },
            TitleLevel::Secondary => rsx! { h3 { class: "match__title", "{entry.title}" } },
        }
        p { class: "match__age", "{entry.age_label}" }
        div { class: "match__description",
            for line in entry.description_lines.iter() {
                p { "{line}" }
            }
        }
    }
}

#[component]
pub(super) fn CardStep(card: CardVm, busy: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "cards",
            div { class: "cards__header",
                h2 { class: "cards__title", "Your potential matches" }
                p { class: "cards__position", "{card.position_label}" }
            }
            div { class: "panel {card.class}",
                MatchBody { entry: card.entry.clone(), level: TitleLevel::Secondary }
                div { class: "match-card__actions",
                    button {
                        class: "btn btn-secondary",
                        id: "card-skip",
                        disabled: busy,
                        onclick: move |_| on_intent.call(QuizIntent::Card(CardChoice::Skip)),
                        "❌ Skip"
                    }
                    button {
                        class: "btn btn-primary",
                        id: "card-choose",
                        disabled: busy,
                        onclick: move |_| on_intent.call(QuizIntent::Card(CardChoice::Choose)),
                        "❤️ Choose"
                    }
                }
            }
        }
    }
}
