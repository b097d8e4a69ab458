//! Shipped content of the "find your perfect data match" quiz.

use crate::model::ids::{ATLAN, DATA_QUALITY, PIPELINE, SHADOW_AI};
use crate::model::question::{AnswerOption, Question};
use crate::model::result::{CallToAction, ResultEntry};

pub(crate) const REGOVERN_URL: &str = "https://atlan.com/regovern/";
pub(crate) const REGOVERN_SIGNUP_URL: &str = "https://atlan.com/regovern?ref=regovern-quiz";

fn question(prompt: &str, options: [&str; 4]) -> Question {
    Question::new(prompt, options.into_iter().map(AnswerOption::new).collect())
}

pub(crate) fn questions() -> Vec<Question> {
    vec![
        question(
            "What ruins your week most often?",
            [
                "A 3 a.m. pipeline alert (again)",
                "Another \"AI experiment\" nobody approved",
                "Dashboards that all tell a different story",
                "Chasing missing context like it's a crime scene",
            ],
        ),
        question(
            "What do you want most in a partner?",
            [
                "Reliability, no surprises",
                "Context that's actually useful",
                "Metadata that works as hard as I do",
                "AI-ready from day one",
            ],
        ),
        question(
            "Biggest red flag?",
            [
                "Ghosts you during audits",
                "Shows up late with broken pipelines",
                "Secretive, never shares lineage",
                "Swears they're \"AI-ready\" but breaks at scale",
            ],
        ),
    ]
}

pub(crate) fn results() -> Vec<ResultEntry> {
    vec![
        ResultEntry::new(
            PIPELINE,
            "💔",
            "Unreliable Pipeline",
            "5 years old, but feels like 50",
            "Always late, never commits. Loves breaking right before exec reviews. \
             Swipe right if you enjoy 3 a.m. alerts and trust issues.",
            CallToAction::new("See how Atlan fixes this", "#"),
        ),
        ResultEntry::new(
            SHADOW_AI,
            "👻",
            "Shadow AI Model",
            "Unknown",
            "I move fast and break compliance. Big fan of secrets, hate documentation.\n\
             I'll ghost you during audits but look amazing in demos.",
            CallToAction::new("See how Atlan brings models into the light", "#"),
        ),
        ResultEntry::new(
            DATA_QUALITY,
            "✅",
            "Data Quality",
            "Mature, dependable",
            "Low drama, high standards. Gets overlooked, but always there when you need me. \
             Ready for a long-term relationship, if you'll just notice me.",
            CallToAction::new("See how Atlan makes quality everyone's job", "#"),
        ),
        ResultEntry::new(
            ATLAN,
            "💙",
            "Atlan",
            "Timeless",
            "Transparent, reliable, AI-ready. Context is my love language. \
             I'll never ghost you, and your board will love me. Let's build something real.",
            CallToAction::new("Find a healthier relationship at Re:Govern", REGOVERN_URL),
        )
        .with_secondary(CallToAction::new("Join us at Re:Govern →", REGOVERN_SIGNUP_URL)),
    ]
}
