use serde::Serialize;
use thiserror::Error;

use crate::analytics::{AnalyticsEvent, EventName};
use crate::model::catalog::{Catalog, CatalogError};
use crate::model::ids::ResultId;
use crate::model::result::ResultEntry;
use crate::motion::SwipeDirection;
use crate::resolve::resolve;

/// Sent as the previous result of a reset that never reached a selection.
pub const UNKNOWN_RESULT: &str = "unknown";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[error("{operation} is not valid during {phase:?}")]
    WrongPhase {
        operation: &'static str,
        phase: Phase,
    },

    #[error("option {option} out of range for question {question} (have {len})")]
    OptionOutOfRange {
        question: usize,
        option: usize,
        len: usize,
    },

    #[error("question {question} has already been answered")]
    AlreadyAnswered { question: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

//
// ─── PHASE / CHOICE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Questioning,
    CardReview,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardChoice {
    Choose,
    Skip,
}

impl CardChoice {
    #[must_use]
    pub const fn direction(self) -> SwipeDirection {
        match self {
            Self::Choose => SwipeDirection::Right,
            Self::Skip => SwipeDirection::Left,
        }
    }
}

/// How a session reached its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMethod {
    CardSelection,
    SkippedAllCards,
}

impl CompletionMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CardSelection => "card_selection",
            Self::SkippedAllCards => "skipped_all_cards",
        }
    }
}

/// Progress through the question phase, for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// One-based number of the question on screen.
    pub current: usize,
    pub total: usize,
    pub percent: u8,
}

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// The outcome of a transition: the next session plus events to emit once it commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub session: QuizSession,
    pub events: Vec<AnalyticsEvent>,
}

impl Step {
    fn new(session: QuizSession, events: Vec<AnalyticsEvent>) -> Self {
        Self { session, events }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// All mutable quiz state for one mounted quiz view.
///
/// Transitions never mutate in place; each returns a fresh value in a `Step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    current_question: usize,
    answers: Vec<Option<usize>>,
    current_card: usize,
    selected_match: Option<ResultId>,
    phase: Phase,
    lead_capture_open: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_question_count(catalog.questions().len())
    }

    fn with_question_count(count: usize) -> Self {
        Self {
            current_question: 0,
            answers: vec![None; count],
            current_card: 0,
            selected_match: None,
            phase: Phase::Questioning,
            lead_capture_open: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.current_question
    }

    #[must_use]
    pub fn current_card_index(&self) -> usize {
        self.current_card
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn selected_match(&self) -> Option<&ResultId> {
        self.selected_match.as_ref()
    }

    #[must_use]
    pub fn lead_capture_open(&self) -> bool {
        self.lead_capture_open
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Result
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.answers.len().max(1);
        let current = (self.current_question + 1).min(total);
        let percent = (current * 100 + total / 2) / total;
        QuizProgress {
            current,
            total,
            percent: u8::try_from(percent).unwrap_or(100),
        }
    }

    /// The entry this session resolves to right now.
    ///
    /// Meaningful once the session is complete; earlier it reflects the answers so far.
    #[must_use]
    pub fn resolved<'c>(&self, catalog: &'c Catalog) -> &'c ResultEntry {
        resolve(
            catalog.results(),
            &self.answers,
            self.selected_match.as_ref(),
        )
    }

    fn require(&self, operation: &'static str, phase: Phase) -> Result<(), TransitionError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    /// Record the answer to the current question and advance.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` outside the question phase,
    /// `TransitionError::OptionOutOfRange` for an unknown option and
    /// `TransitionError::AlreadyAnswered` if the slot was written before.
    pub fn answer(&self, catalog: &Catalog, option: usize) -> Result<Step, TransitionError> {
        self.require("answer", Phase::Questioning)?;

        let index = self.current_question;
        let question = catalog.questions().question_at(index)?;
        let chosen = question
            .option(option)
            .ok_or(TransitionError::OptionOutOfRange {
                question: index,
                option,
                len: question.options().len(),
            })?;
        let slot = self
            .answers
            .get(index)
            .ok_or(CatalogError::QuestionOutOfRange {
                index,
                len: self.answers.len(),
            })?;
        if slot.is_some() {
            return Err(TransitionError::AlreadyAnswered { question: index });
        }

        let total = catalog.questions().len();
        #[allow(clippy::cast_precision_loss)]
        let progress = (index + 1) as f64 / total as f64;
        let event = AnalyticsEvent::new(EventName::QuizAnswer)
            .with("question_index", index)
            .with("question", question.prompt())
            .with("answer_index", option)
            .with("answer_text", chosen.label())
            .with("progress", progress);

        let mut next = self.clone();
        next.answers[index] = Some(option);
        if index + 1 < total {
            next.current_question = index + 1;
        } else {
            next.phase = Phase::CardReview;
            next.current_card = 0;
        }
        Ok(Step::new(next, vec![event]))
    }

    /// Choose or skip the card on screen.
    ///
    /// Skipping the last card completes the session with the catalog default.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` outside card review.
    pub fn card_choice(
        &self,
        catalog: &Catalog,
        choice: CardChoice,
    ) -> Result<Step, TransitionError> {
        self.require("card_choice", Phase::CardReview)?;

        let results = catalog.results();
        let index = self.current_card;
        let card = results.result_at(index)?;
        let mut next = self.clone();
        let mut events = Vec::with_capacity(2);

        let method = match choice {
            CardChoice::Choose => {
                next.selected_match = Some(card.id.clone());
                CompletionMethod::CardSelection
            }
            CardChoice::Skip => {
                events.push(
                    AnalyticsEvent::new(EventName::CardSwipe)
                        .with("card_index", index)
                        .with("result_id", card.id.as_str())
                        .with("direction", choice.direction().as_str()),
                );
                if index + 1 < results.len() {
                    next.current_card = index + 1;
                    return Ok(Step::new(next, events));
                }
                next.selected_match = Some(results.default_entry().id.clone());
                CompletionMethod::SkippedAllCards
            }
        };

        next.phase = Phase::Result;
        let suggested = resolve(results, &self.answers, None);
        let result = next.resolved(catalog);
        events.push(
            AnalyticsEvent::new(EventName::QuizComplete)
                .with("result_id", result.id.as_str())
                .with("method", method.as_str())
                .with("card_index", index)
                .with("suggested_result_id", suggested.id.as_str()),
        );
        Ok(Step::new(next, events))
    }

    /// Start over with a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` unless the session is complete.
    pub fn reset(&self) -> Result<Step, TransitionError> {
        self.require("reset", Phase::Result)?;

        let previous = self
            .selected_match
            .as_ref()
            .map_or(UNKNOWN_RESULT, ResultId::as_str);
        let event = AnalyticsEvent::new(EventName::QuizReset).with("previous_result", previous);
        Ok(Step::new(
            Self::with_question_count(self.answers.len()),
            vec![event],
        ))
    }

    /// Open the lead-capture modal. Opening an open modal changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` unless the session is complete.
    pub fn open_lead_capture(&self, catalog: &Catalog) -> Result<Step, TransitionError> {
        self.require("open_lead_capture", Phase::Result)?;
        if self.lead_capture_open {
            return Ok(Step::new(self.clone(), Vec::new()));
        }

        let mut next = self.clone();
        next.lead_capture_open = true;
        let event = AnalyticsEvent::new(EventName::RegovernSignupClick)
            .with("result_id", self.resolved(catalog).id.as_str());
        Ok(Step::new(next, vec![event]))
    }

    /// # Errors
    ///
    /// Returns `TransitionError::WrongPhase` unless the session is complete.
    pub fn close_lead_capture(&self) -> Result<Step, TransitionError> {
        self.require("close_lead_capture", Phase::Result)?;
        let mut next = self.clone();
        next.lead_capture_open = false;
        Ok(Step::new(next, Vec::new()))
    }
}
