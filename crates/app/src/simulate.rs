//! Headless run of the complete quiz flow on virtual time.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use quiz_core::TransitionTimings;
use quiz_core::model::{CardChoice, Catalog, CompletionMethod};
use services::{
    Analytics, Collaborators, FlowError, LogLauncher, ManualScheduler, QuizConfig, QuizFlow,
    TracingSink, UnavailableProvider,
};

/// What to do during card review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPlan {
    Choose(usize),
    SkipAll,
}

#[derive(Debug)]
pub enum SimulateError {
    AnswerCount { expected: usize, got: usize },
    CardOutOfRange { index: usize, len: usize },
    Flow(FlowError),
    Incomplete,
}

impl fmt::Display for SimulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulateError::AnswerCount { expected, got } => {
                write!(f, "expected {expected} answers, got {got}")
            }
            SimulateError::CardOutOfRange { index, len } => {
                write!(f, "card {index} out of range (0..{len})")
            }
            SimulateError::Flow(err) => write!(f, "{err}"),
            SimulateError::Incomplete => write!(f, "quiz did not reach a result"),
        }
    }
}

impl std::error::Error for SimulateError {}

impl From<FlowError> for SimulateError {
    fn from(err: FlowError) -> Self {
        Self::Flow(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaReport {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    pub answers: Vec<usize>,
    pub method: &'static str,
    pub chosen_card: Option<usize>,
    pub result_id: String,
    pub emoji: String,
    pub title: String,
    pub age: String,
    pub description: String,
    pub call_to_action: CtaReport,
}

pub fn simulate(
    config: &QuizConfig,
    answers: &[usize],
    plan: CardPlan,
) -> Result<SimulationReport, SimulateError> {
    let catalog = Arc::new(Catalog::data_match());
    let expected = catalog.questions().len();
    if answers.len() != expected {
        return Err(SimulateError::AnswerCount {
            expected,
            got: answers.len(),
        });
    }
    let cards = catalog.results().len();
    match plan {
        CardPlan::Choose(index) if index >= cards => {
            return Err(SimulateError::CardOutOfRange { index, len: cards });
        }
        _ => {}
    }

    let analytics = if config.analytics.enabled {
        Analytics::new(Arc::new(TracingSink))
    } else {
        Analytics::disabled()
    };
    let mut flow = QuizFlow::new(
        catalog,
        config,
        Collaborators {
            analytics,
            launcher: Arc::new(LogLauncher),
            forms: Arc::new(UnavailableProvider),
        },
    )
    .with_timings(TransitionTimings::instant());
    let scheduler = ManualScheduler::new();

    for &option in answers {
        flow.answer(option, &scheduler)?;
        scheduler.run_until_idle(&mut flow);
    }
    for card in 0..cards {
        if flow.session().is_complete() {
            break;
        }
        let choice = match plan {
            CardPlan::Choose(index) if index == card => CardChoice::Choose,
            _ => CardChoice::Skip,
        };
        flow.card_choice(choice, &scheduler)?;
        scheduler.run_until_idle(&mut flow);
    }

    let entry = flow.result().ok_or(SimulateError::Incomplete)?;
    let (method, chosen_card) = match plan {
        CardPlan::Choose(index) => (CompletionMethod::CardSelection, Some(index)),
        CardPlan::SkipAll => (CompletionMethod::SkippedAllCards, None),
    };
    tracing::info!(result = %entry.id, method = method.as_str(), "simulation complete");

    Ok(SimulationReport {
        answers: answers.to_vec(),
        method: method.as_str(),
        chosen_card,
        result_id: entry.id.to_string(),
        emoji: entry.emoji.clone(),
        title: entry.title.clone(),
        age: entry.subtitle.clone(),
        description: entry.description.clone(),
        call_to_action: CtaReport {
            label: entry.call_to_action.label.clone(),
            url: entry.call_to_action.url.clone(),
        },
    })
}
