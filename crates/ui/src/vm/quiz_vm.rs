use quiz_core::model::{Phase, ResultEntry};
use quiz_core::{Motion, MotionKind, SwipeDirection, TransitionTimings};
use services::{LeadCaptureStatus, QuizFlow};

const DEFAULT_SIGNUP_LABEL: &str = "Join us at Re:Govern →";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub percent: u8,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub class: &'static str,
}

impl QuestionVm {
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }

    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%;", self.percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchVm {
    pub emoji: String,
    pub title: String,
    pub age_label: String,
    pub description_lines: Vec<String>,
}

impl MatchVm {
    fn from_entry(entry: &ResultEntry) -> Self {
        Self {
            emoji: entry.emoji.clone(),
            title: entry.title.clone(),
            age_label: format!("Age: {}", entry.subtitle),
            description_lines: entry.description_lines().map(str::to_owned).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardVm {
    pub position_label: String,
    pub entry: MatchVm,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub result_id: String,
    pub entry: MatchVm,
    pub cta_label: String,
    pub signup_label: String,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageVm {
    Question(QuestionVm),
    Cards(CardVm),
    Result(ResultVm),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeadModalVm {
    Hidden,
    Loading,
    Form,
    Unavailable { fallback_url: String },
}

/// Everything the quiz view renders, derived from the flow alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub stage: StageVm,
    pub busy: bool,
    pub modal: LeadModalVm,
    /// CSS custom properties carrying the configured animation durations.
    pub timing_style: String,
}

#[must_use]
pub fn quiz_vm(flow: &QuizFlow) -> QuizVm {
    let session = flow.session();
    let motion = flow.motion();
    let stage = match session.phase() {
        Phase::Questioning => {
            let progress = session.progress();
            let (prompt, options) = flow.current_question().map_or_else(
                || (String::new(), Vec::new()),
                |question| {
                    let options = question
                        .options()
                        .iter()
                        .enumerate()
                        .map(|(index, option)| OptionVm {
                            index,
                            label: option.label().to_owned(),
                            note: option.note().map(str::to_owned),
                        })
                        .collect();
                    (question.prompt().to_owned(), options)
                },
            );
            StageVm::Question(QuestionVm {
                progress_label: format!("Question {} of {}", progress.current, progress.total),
                percent: progress.percent,
                prompt,
                options,
                class: question_class(motion),
            })
        }
        Phase::CardReview => {
            let total = flow.catalog().results().len();
            let position = session.current_card_index() + 1;
            let entry = flow
                .current_card()
                .unwrap_or_else(|| flow.catalog().results().default_entry());
            StageVm::Cards(CardVm {
                position_label: format!("Card {position} of {total}"),
                entry: MatchVm::from_entry(entry),
                class: card_class(motion),
            })
        }
        Phase::Result => {
            let entry = session.resolved(flow.catalog());
            StageVm::Result(ResultVm {
                result_id: entry.id.to_string(),
                entry: MatchVm::from_entry(entry),
                cta_label: entry.call_to_action.label.clone(),
                signup_label: entry
                    .secondary_call_to_action
                    .as_ref()
                    .map_or_else(|| DEFAULT_SIGNUP_LABEL.to_owned(), |cta| cta.label.clone()),
                class: if flow.result_visible() {
                    "result result--visible"
                } else {
                    "result result--hidden"
                },
            })
        }
    };

    let modal = if session.lead_capture_open() {
        match flow.lead_capture_status() {
            LeadCaptureStatus::Closed | LeadCaptureStatus::Loading => LeadModalVm::Loading,
            LeadCaptureStatus::Unavailable => LeadModalVm::Unavailable {
                fallback_url: flow.lead_capture().settings().fallback_url.clone(),
            },
            LeadCaptureStatus::Ready
            | LeadCaptureStatus::Submitting
            | LeadCaptureStatus::Completed => LeadModalVm::Form,
        }
    } else {
        LeadModalVm::Hidden
    };

    QuizVm {
        stage,
        busy: flow.is_busy(),
        modal,
        timing_style: timing_style(flow.timings()),
    }
}

fn timing_style(timings: &TransitionTimings) -> String {
    format!(
        "--question-exit: {}ms; --card-swipe: {}ms; --result-fade: {}ms;",
        timings.question_exit.as_millis(),
        timings.card_swipe.as_millis(),
        timings.result_fade.as_millis(),
    )
}

fn question_class(motion: Motion) -> &'static str {
    match motion {
        Motion::Exiting(MotionKind::Question) => "step step--exiting",
        Motion::Entering(MotionKind::Question) => "step step--entering",
        _ => "step",
    }
}

fn card_class(motion: Motion) -> &'static str {
    match motion {
        Motion::Exiting(MotionKind::Swipe(SwipeDirection::Left)) => "match-card match-card--left",
        Motion::Exiting(MotionKind::Swipe(SwipeDirection::Right)) => "match-card match-card--right",
        Motion::Entering(MotionKind::Swipe(_)) => "match-card match-card--entering",
        _ => "match-card",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use quiz_core::model::{CardChoice, Catalog};
    use services::{
        Analytics, Collaborators, LogLauncher, ManualScheduler, QuizConfig, UnavailableProvider,
    };

    use super::*;

    fn flow() -> QuizFlow {
        QuizFlow::new(
            Arc::new(Catalog::data_match()),
            &QuizConfig::default(),
            Collaborators {
                analytics: Analytics::disabled(),
                launcher: Arc::new(LogLauncher),
                forms: Arc::new(UnavailableProvider),
            },
        )
    }

    fn finish(flow: &mut QuizFlow, scheduler: &ManualScheduler, answers: [usize; 3]) {
        for option in answers {
            flow.answer(option, scheduler).unwrap();
            scheduler.run_until_idle(flow);
        }
        for _ in 0..4 {
            flow.card_choice(CardChoice::Skip, scheduler).unwrap();
            scheduler.run_until_idle(flow);
        }
    }

    #[test]
    fn first_question_shows_progress() {
        let vm = quiz_vm(&flow());
        let StageVm::Question(question) = vm.stage else {
            panic!("expected question stage");
        };
        assert_eq!(question.progress_label, "Question 1 of 3");
        assert_eq!(question.percent_label(), "33%");
        assert_eq!(question.prompt, "What ruins your week most often?");
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.class, "step");
        assert!(!vm.busy);
        assert_eq!(vm.modal, LeadModalVm::Hidden);
        assert_eq!(
            vm.timing_style,
            "--question-exit: 300ms; --card-swipe: 700ms; --result-fade: 600ms;"
        );
    }

    #[test]
    fn exiting_question_is_busy() {
        let mut flow = flow();
        let scheduler = ManualScheduler::new();
        flow.answer(0, &scheduler).unwrap();

        let vm = quiz_vm(&flow);
        assert!(vm.busy);
        let StageVm::Question(question) = vm.stage else {
            panic!("expected question stage");
        };
        assert_eq!(question.class, "step step--exiting");
        assert_eq!(question.progress_label, "Question 1 of 3");
    }

    #[test]
    fn card_stage_labels_position_and_swipe() {
        let mut flow = flow();
        let scheduler = ManualScheduler::new();
        for option in [0, 0, 0] {
            flow.answer(option, &scheduler).unwrap();
            scheduler.run_until_idle(&mut flow);
        }
        flow.card_choice(CardChoice::Skip, &scheduler).unwrap();

        let StageVm::Cards(card) = quiz_vm(&flow).stage else {
            panic!("expected card stage");
        };
        assert_eq!(card.position_label, "Card 1 of 4");
        assert_eq!(card.entry.title, "Unreliable Pipeline");
        assert_eq!(card.entry.age_label, "Age: 5 years old, but feels like 50");
        assert_eq!(card.class, "match-card match-card--left");
    }

    #[test]
    fn result_hidden_until_reveal_delay_passes() {
        let mut flow = flow();
        let scheduler = ManualScheduler::new();
        for option in [0, 0, 0] {
            flow.answer(option, &scheduler).unwrap();
            scheduler.run_until_idle(&mut flow);
        }
        flow.card_choice(CardChoice::Choose, &scheduler).unwrap();
        scheduler.advance(&mut flow, Duration::from_millis(700));

        let StageVm::Result(result) = quiz_vm(&flow).stage else {
            panic!("expected result stage");
        };
        assert_eq!(result.class, "result result--hidden");
        assert_eq!(result.signup_label, DEFAULT_SIGNUP_LABEL);

        scheduler.run_until_idle(&mut flow);
        let StageVm::Result(result) = quiz_vm(&flow).stage else {
            panic!("expected result stage");
        };
        assert_eq!(result.class, "result result--visible");
    }

    #[test]
    fn shadow_ai_description_keeps_line_break() {
        let mut flow = flow();
        let scheduler = ManualScheduler::new();
        for option in [3, 0, 0] {
            flow.answer(option, &scheduler).unwrap();
            scheduler.run_until_idle(&mut flow);
        }
        flow.card_choice(CardChoice::Skip, &scheduler).unwrap();
        scheduler.run_until_idle(&mut flow);
        flow.card_choice(CardChoice::Choose, &scheduler).unwrap();
        scheduler.run_until_idle(&mut flow);

        let StageVm::Result(result) = quiz_vm(&flow).stage else {
            panic!("expected result stage");
        };
        assert_eq!(result.result_id, "shadow-ai");
        assert_eq!(result.entry.description_lines.len(), 2);
    }

    #[test]
    fn unavailable_form_exposes_fallback_link() {
        let mut flow = flow();
        let scheduler = ManualScheduler::new();
        finish(&mut flow, &scheduler, [0, 0, 0]);
        flow.open_lead_capture().unwrap();

        let vm = quiz_vm(&flow);
        assert_eq!(
            vm.modal,
            LeadModalVm::Unavailable {
                fallback_url: "https://atlan.com/regovern?ref=regovern-quiz".into()
            }
        );
        let StageVm::Result(result) = vm.stage else {
            panic!("expected result stage");
        };
        assert_eq!(result.result_id, "atlan");
        assert_eq!(result.signup_label, "Join us at Re:Govern →");
    }
}
