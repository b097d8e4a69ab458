use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;

use crate::glue::scroll_into_view_script;
use crate::views::QuizView;

pub(crate) const QUIZ_SECTION_ID: &str = "quiz-section";
const SCROLL_DELAY: Duration = Duration::from_millis(100);

#[component]
pub fn LandingView() -> Element {
    let mut started = use_signal(|| false);

    let on_start = use_callback(move |()| {
        started.set(true);
        spawn(async move {
            tokio::time::sleep(SCROLL_DELAY).await;
            let _ = eval(&scroll_into_view_script(QUIZ_SECTION_ID));
        });
    });

    rsx! {
        div { class: "landing",
            Hero { on_start }
            if started() {
                section { id: QUIZ_SECTION_ID, class: "quiz-section",
                    div { class: "container",
                        QuizView {}
                    }
                }
            }
        }
    }
}

#[component]
fn Hero(on_start: EventHandler<()>) -> Element {
    rsx! {
        div { class: "hero",
            div { class: "hero__overlay" }
            div { class: "hero__content",
                h1 { class: "hero__title",
                    "Find your perfect"
                    br {}
                    span { class: "hero__accent", "data match" }
                }
                p { class: "hero__subtitle", "Stop ghosting your data, start a real relationship." }
                button {
                    class: "btn btn-hero",
                    id: "hero-start",
                    onclick: move |_| on_start.call(()),
                    "Start swiping ❤️"
                }
                span { class: "hero__float hero__float--one", "💕" }
                span { class: "hero__float hero__float--two", "📊" }
                span { class: "hero__float hero__float--three", "🔍" }
                span { class: "hero__float hero__float--four", "✨" }
            }
            div { class: "hero__scroll", "Scroll to start" }
        }
    }
}
