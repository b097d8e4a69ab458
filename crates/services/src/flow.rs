//! Quiz Flow Engine: owns the session and sequences animated transitions.

use std::sync::Arc;

use url::Url;

use quiz_core::model::{
    CardChoice, Catalog, Phase, Question, QuizSession, ResultEntry, Step, TransitionError,
};
use quiz_core::{AnalyticsEvent, EventName, Motion, MotionKind, TransitionTimings};

use crate::analytics::Analytics;
use crate::config::QuizConfig;
use crate::error::FlowError;
use crate::lead_capture::{
    LeadCapture, LeadCaptureEvent, LeadCaptureProvider, LeadCaptureStatus, MountTicket,
};
use crate::scheduler::{Deferred, DeferredTask, Scheduler};
use crate::share::{SharePlatform, ShareLauncher, share_url};

/// Whether an input was acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Accepted,
    /// Dropped because an animation is running or the flow was disposed.
    Ignored,
}

/// External collaborators the flow talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub analytics: Analytics,
    pub launcher: Arc<dyn ShareLauncher>,
    pub forms: Arc<dyn LeadCaptureProvider>,
}

/// Owning controller for one mounted quiz.
///
/// Every animated transition is split in two: the next `Step` is parked while
/// the exit animation runs, then committed by a deferred `Commit` task. Input
/// is ignored until the following `Settle` task returns the motion to idle.
/// Deferred tasks from before a reset or dispose are dropped by epoch.
pub struct QuizFlow {
    catalog: Arc<Catalog>,
    timings: TransitionTimings,
    analytics: Analytics,
    launcher: Arc<dyn ShareLauncher>,
    lead: LeadCapture,
    page_url: Url,
    share_caption: String,
    session: QuizSession,
    motion: Motion,
    pending: Option<(MotionKind, Step)>,
    epoch: u64,
    disposed: bool,
}

impl QuizFlow {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: &QuizConfig, collaborators: Collaborators) -> Self {
        let session = QuizSession::new(&catalog);
        Self {
            lead: LeadCapture::new(collaborators.forms, config.lead_capture.settings()),
            catalog,
            timings: config.timings(),
            analytics: collaborators.analytics,
            launcher: collaborators.launcher,
            page_url: config.page_url.clone(),
            share_caption: config.share_caption.clone(),
            session,
            motion: Motion::Idle,
            pending: None,
            epoch: 0,
            disposed: false,
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    //
    // ─── READ-ONLY PROJECTION ──────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[must_use]
    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.motion.accepts_input()
    }

    #[must_use]
    pub fn lead_capture(&self) -> &LeadCapture {
        &self.lead
    }

    #[must_use]
    pub fn lead_capture_status(&self) -> LeadCaptureStatus {
        self.lead.status()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        (self.session.phase() == Phase::Questioning)
            .then(|| {
                self.catalog
                    .questions()
                    .question_at(self.session.current_question_index())
                    .ok()
            })
            .flatten()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&ResultEntry> {
        (self.session.phase() == Phase::CardReview)
            .then(|| {
                self.catalog
                    .results()
                    .result_at(self.session.current_card_index())
                    .ok()
            })
            .flatten()
    }

    /// The resolved result, once the session is complete.
    #[must_use]
    pub fn result(&self) -> Option<&ResultEntry> {
        self.session
            .is_complete()
            .then(|| self.session.resolved(&self.catalog))
    }

    /// False while the result is waiting out its reveal delay.
    #[must_use]
    pub fn result_visible(&self) -> bool {
        self.session.is_complete() && self.motion != Motion::Entering(MotionKind::Reveal)
    }

    //
    // ─── INPUT ─────────────────────────────────────────────────────────────────
    //

    fn gate(&self, input: &'static str) -> bool {
        if self.disposed {
            tracing::debug!(input, "flow disposed, ignoring input");
            return false;
        }
        if !self.motion.accepts_input() {
            tracing::debug!(input, motion = ?self.motion, "animation running, ignoring input");
            return false;
        }
        true
    }

    /// Answer the current question with option `option`.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` outside the question phase or for an unknown option.
    pub fn answer(&mut self, option: usize, scheduler: &dyn Scheduler) -> Result<Dispatch, FlowError> {
        if !self.gate("answer") {
            return Ok(Dispatch::Ignored);
        }
        let step = self.session.answer(&self.catalog, option)?;
        self.begin(MotionKind::Question, step, scheduler);
        Ok(Dispatch::Accepted)
    }

    /// Choose or skip the card on screen.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` outside card review.
    pub fn card_choice(
        &mut self,
        choice: CardChoice,
        scheduler: &dyn Scheduler,
    ) -> Result<Dispatch, FlowError> {
        if !self.gate("card_choice") {
            return Ok(Dispatch::Ignored);
        }
        let step = self.session.card_choice(&self.catalog, choice)?;
        self.begin(MotionKind::Swipe(choice.direction()), step, scheduler);
        Ok(Dispatch::Accepted)
    }

    /// Replace the session with a fresh one. Pending deferred work becomes stale.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` unless the session is complete.
    pub fn reset(&mut self, scheduler: &dyn Scheduler) -> Result<Dispatch, FlowError> {
        if !self.gate("reset") {
            return Ok(Dispatch::Ignored);
        }
        let step = self.session.reset()?;
        self.epoch += 1;
        self.pending = None;
        self.lead.close();
        self.session = step.session;
        self.analytics.track_all(&step.events);
        tracing::info!(epoch = self.epoch, "quiz reset");
        self.enter(MotionKind::Question, scheduler);
        Ok(Dispatch::Accepted)
    }

    /// Open the lead-capture modal and mount the form.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` unless the session is complete.
    pub fn open_lead_capture(&mut self) -> Result<Dispatch, FlowError> {
        if !self.gate("open_lead_capture") {
            return Ok(Dispatch::Ignored);
        }
        let step = self.session.open_lead_capture(&self.catalog)?;
        self.session = step.session;
        self.analytics.track_all(&step.events);
        let ticket = self.lead.open();
        tracing::debug!(%ticket, status = ?self.lead.status(), "lead capture opened");
        Ok(Dispatch::Accepted)
    }

    /// Close the modal and release its container.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` unless the session is complete.
    pub fn close_lead_capture(&mut self) -> Result<Dispatch, FlowError> {
        if self.disposed {
            return Ok(Dispatch::Ignored);
        }
        let step = self.session.close_lead_capture()?;
        self.session = step.session;
        self.lead.close();
        Ok(Dispatch::Accepted)
    }

    /// Deliver a lifecycle callback from the form provider.
    pub fn on_lead_capture_event(
        &mut self,
        ticket: MountTicket,
        event: LeadCaptureEvent,
        scheduler: &dyn Scheduler,
    ) {
        let Some(status) = self.lead.apply(ticket, event) else {
            return;
        };
        match status {
            LeadCaptureStatus::Completed => {
                let result_id = self.session.resolved(&self.catalog).id.to_string();
                self.analytics.track(
                    &AnalyticsEvent::new(EventName::RegovernSignupComplete)
                        .with("result_id", result_id),
                );
                scheduler.schedule(
                    self.timings.lead_capture_close_delay,
                    self.task(Deferred::CloseLeadCapture { ticket }),
                );
            }
            LeadCaptureStatus::Unavailable => {
                tracing::warn!(%ticket, "lead-capture provider reported failure");
            }
            _ => {}
        }
    }

    /// Track and launch a share of the current page.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` unless the session is complete.
    pub fn share(&self, platform: SharePlatform) -> Result<Url, FlowError> {
        let result = self.require_result("share")?;
        let url = share_url(platform, &self.page_url, &self.share_caption);
        self.analytics.track(
            &AnalyticsEvent::new(platform.event_name())
                .with("result_id", result.id.as_str())
                .with("url", self.page_url.as_str()),
        );
        self.launch(&url);
        Ok(url)
    }

    /// Track and follow the result's call to action.
    ///
    /// Returns the launched URL, or `None` when the target is a placeholder.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Transition` unless the session is complete.
    pub fn open_result_cta(&self) -> Result<Option<Url>, FlowError> {
        let result = self.require_result("open_result_cta")?;
        let cta = &result.call_to_action;
        self.analytics.track(
            &AnalyticsEvent::new(EventName::ResultCtaClick)
                .with("result_id", result.id.as_str())
                .with("label", cta.label.as_str())
                .with("url", cta.url.as_str()),
        );
        match Url::parse(&cta.url) {
            Ok(url) => {
                self.launch(&url);
                Ok(Some(url))
            }
            Err(err) => {
                tracing::debug!(url = %cta.url, error = %err, "call to action has no absolute target");
                Ok(None)
            }
        }
    }

    /// Tear down for unmount. Pending deferred work becomes stale.
    pub fn dispose(&mut self) {
        self.epoch += 1;
        self.pending = None;
        self.lead.close();
        self.disposed = true;
    }

    //
    // ─── DEFERRED WORK ─────────────────────────────────────────────────────────
    //

    /// Run a task handed back by the scheduler. Returns false if it was stale.
    pub fn fire(&mut self, task: DeferredTask, scheduler: &dyn Scheduler) -> bool {
        if task.epoch != self.epoch {
            tracing::debug!(task_epoch = task.epoch, epoch = self.epoch, kind = ?task.kind, "stale deferred task");
            return false;
        }
        match task.kind {
            Deferred::Commit => self.commit(scheduler),
            Deferred::Settle => {
                if self.motion.is_entering() {
                    self.motion = Motion::Idle;
                }
                true
            }
            Deferred::CloseLeadCapture { ticket } => {
                if self.lead.ticket() != ticket || !self.lead.status().is_open() {
                    return false;
                }
                if let Err(err) = self.close_lead_capture() {
                    tracing::warn!(error = %err, "deferred lead-capture close failed");
                    return false;
                }
                true
            }
        }
    }

    fn task(&self, kind: Deferred) -> DeferredTask {
        DeferredTask {
            epoch: self.epoch,
            kind,
        }
    }

    fn begin(&mut self, kind: MotionKind, step: Step, scheduler: &dyn Scheduler) {
        self.pending = Some((kind, step));
        self.motion = Motion::Exiting(kind);
        scheduler.schedule(self.timings.exit_for(kind), self.task(Deferred::Commit));
    }

    fn commit(&mut self, scheduler: &dyn Scheduler) -> bool {
        let Some((kind, step)) = self.pending.take() else {
            return false;
        };
        self.session = step.session;
        self.analytics.track_all(&step.events);
        tracing::info!(
            phase = ?self.session.phase(),
            question = self.session.current_question_index(),
            card = self.session.current_card_index(),
            "quiz step committed"
        );
        let entering = if self.session.is_complete() {
            MotionKind::Reveal
        } else {
            kind
        };
        self.enter(entering, scheduler);
        true
    }

    fn enter(&mut self, kind: MotionKind, scheduler: &dyn Scheduler) {
        self.motion = Motion::Entering(kind);
        scheduler.schedule(self.timings.settle_for(kind), self.task(Deferred::Settle));
    }

    fn require_result(&self, operation: &'static str) -> Result<&ResultEntry, FlowError> {
        self.result().ok_or_else(|| {
            FlowError::Transition(TransitionError::WrongPhase {
                operation,
                phase: self.session.phase(),
            })
        })
    }

    fn launch(&self, url: &Url) {
        if let Err(err) = self.launcher.open(url) {
            tracing::warn!(%url, error = %err, "could not open link");
        }
    }
}

impl std::fmt::Debug for QuizFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizFlow")
            .field("session", &self.session)
            .field("motion", &self.motion)
            .field("pending", &self.pending.is_some())
            .field("epoch", &self.epoch)
            .field("lead", &self.lead)
            .finish_non_exhaustive()
    }
}
