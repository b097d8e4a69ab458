use dioxus::prelude::{Key, ReadableExt};
use quiz_core::model::CardChoice;
use services::SharePlatform;

use super::QuizIntent;
use super::quiz::modal_key_intent;
use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_hero_only() {
    let mut harness = setup_view_harness(ViewKind::Landing);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Find your perfect"), "missing title in {html}");
    assert!(html.contains("data match"), "missing accent in {html}");
    assert!(
        html.contains("Stop ghosting your data, start a real relationship."),
        "missing subtitle in {html}"
    );
    assert!(html.contains("Start swiping"), "missing start button in {html}");
    assert!(!html.contains("quiz-section"), "quiz shown before start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("33%"), "missing percent in {html}");
    assert!(
        html.contains("What ruins your week most often?"),
        "missing prompt in {html}"
    );
    assert!(html.contains("question-option-3"), "missing options in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn answering_every_question_moves_to_cards() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    for option in [0, 1, 2] {
        harness.send(QuizIntent::Answer(option)).await;
    }
    let html = harness.render();
    assert!(html.contains("Your potential matches"), "missing header in {html}");
    assert!(html.contains("Card 1 of 4"), "missing position in {html}");
    assert!(html.contains("Unreliable Pipeline"), "missing first card in {html}");
    assert!(
        html.contains(r#"<h3 class="match__title">"#),
        "card title should be a subheading in {html}"
    );
    assert_eq!(harness.sink.names(), ["quiz_answer"; 3]);
}

#[tokio::test(flavor = "current_thread")]
async fn skipping_every_card_reveals_default_match() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    for option in [0, 0, 0] {
        harness.send(QuizIntent::Answer(option)).await;
    }
    for _ in 0..4 {
        harness.send(QuizIntent::Card(CardChoice::Skip)).await;
    }
    let html = harness.render();
    assert!(html.contains("Age: Timeless"), "missing default result in {html}");
    assert!(html.contains("result--visible"), "result not revealed in {html}");
    assert!(
        html.contains(r#"<h2 class="match__title">"#),
        "result title should be a heading in {html}"
    );
    assert!(html.contains("Share on LinkedIn"), "missing share in {html}");
    assert!(html.contains("Share on X"), "missing share in {html}");
    assert!(html.contains("Take Quiz Again"), "missing reset in {html}");
    assert!(harness.sink.names().contains(&"quiz_complete"));
}

#[tokio::test(flavor = "current_thread")]
async fn signup_without_embedded_form_offers_direct_link() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    for option in [0, 0, 0] {
        harness.send(QuizIntent::Answer(option)).await;
    }
    harness.send(QuizIntent::Card(CardChoice::Choose)).await;

    harness.send(QuizIntent::OpenSignup).await;
    let html = harness.render();
    assert!(
        html.contains("The signup form is unavailable right now."),
        "missing placeholder in {html}"
    );
    assert!(
        html.contains("https://atlan.com/regovern?ref=regovern-quiz"),
        "missing fallback link in {html}"
    );

    harness.send(QuizIntent::CloseSignup).await;
    let html = harness.render();
    assert!(!html.contains("lead-overlay"), "modal still open in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn escape_closes_signup_modal() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    for option in [1, 1, 1] {
        harness.send(QuizIntent::Answer(option)).await;
    }
    harness.send(QuizIntent::Card(CardChoice::Choose)).await;
    harness.send(QuizIntent::OpenSignup).await;
    let html = harness.render();
    assert!(
        html.contains(r#"id="lead-overlay""#) && html.contains(r#"tabindex="-1""#),
        "overlay not focusable in {html}"
    );

    assert_eq!(modal_key_intent(&Key::Enter), None);
    let intent = modal_key_intent(&Key::Escape).unwrap();
    harness.send(intent).await;
    let html = harness.render();
    assert!(!html.contains("lead-overlay"), "modal still open in {html}");
    assert!(html.contains("Take Quiz Again"), "result hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn share_and_reset_return_to_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    for option in [2, 0, 0] {
        harness.send(QuizIntent::Answer(option)).await;
    }
    harness.send(QuizIntent::Card(CardChoice::Choose)).await;
    harness.send(QuizIntent::Share(SharePlatform::X)).await;
    harness.send(QuizIntent::Reset).await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    let names = harness.sink.names();
    assert!(names.ends_with(&["share_twitter", "quiz_reset"]), "{names:?}");
    assert!(
        harness
            .handles
            .flow()
            .read()
            .session()
            .answers()
            .iter()
            .all(Option::is_none)
    );
}
