use dioxus::prelude::*;

use crate::vm::QuestionVm;

use super::quiz::QuizIntent;

#[component]
pub(super) fn QuestionStep(
    question: QuestionVm,
    busy: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let percent_label = question.percent_label();
    let bar_style = question.bar_style();

    rsx! {
        div { class: "{question.class}",
            div { class: "progress",
                div { class: "progress__labels",
                    span { "{question.progress_label}" }
                    span { "{percent_label}" }
                }
                div { class: "progress__track",
                    div { class: "progress__bar", style: "{bar_style}" }
                }
            }
            div { class: "panel question",
                h2 { class: "question__prompt", "{question.prompt}" }
                div { class: "question__options",
                    for option in question.options.iter().cloned() {
                        button {
                            key: "{option.index}",
                            class: "question__option",
                            id: "question-option-{option.index}",
                            disabled: busy,
                            onclick: move |_| on_intent.call(QuizIntent::Answer(option.index)),
                            div { class: "question__option-label", "{option.label}" }
                            if let Some(note) = option.note.as_ref() {
                                div { class: "question__option-note", "{note}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
