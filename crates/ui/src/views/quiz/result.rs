use dioxus::prelude::*;

use services::SharePlatform;

use crate::vm::ResultVm;

use super::cards::{MatchBody, TitleLevel};
use super::quiz::QuizIntent;

const SHARE_PLATFORMS: [SharePlatform; 2] = [SharePlatform::LinkedIn, SharePlatform::X];

#[component]
pub(super) fn ResultStep(result: ResultVm, busy: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "{result.class}", "data-result": "{result.result_id}",
            div { class: "panel result__card",
                MatchBody { entry: result.entry.clone(), level: TitleLevel::Primary }
                button {
                    class: "btn btn-primary btn-lg",
                    id: "result-cta",
                    onclick: move |_| on_intent.call(QuizIntent::ResultCta),
                    "{result.cta_label}"
                }
            }
            div { class: "result__share",
                for (platform, label) in SHARE_PLATFORMS.map(|p| (p, p.label())) {
                    button {
                        key: "{label}",
                        class: "btn btn-share",
                        onclick: move |_| on_intent.call(QuizIntent::Share(platform)),
                        "{label}"
                    }
                }
            }
            div { class: "result__signup",
                button {
                    class: "btn btn-primary",
                    id: "result-signup",
                    onclick: move |_| on_intent.call(QuizIntent::OpenSignup),
                    "{result.signup_label}"
                }
            }
            div { class: "result__again",
                button {
                    class: "btn btn-ghost",
                    id: "result-reset",
                    disabled: busy,
                    onclick: move |_| on_intent.call(QuizIntent::Reset),
                    "Take Quiz Again"
                }
            }
        }
    }
}
