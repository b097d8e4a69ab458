//! Adapters between the quiz services and the webview.

use std::sync::Arc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;

use services::{
    AnalyticsError, AnalyticsSink, ContainerId, DeferredTask, EventRecord, LeadCaptureError,
    LeadCaptureEvent, LeadCaptureProvider, MountRequest, MountTicket, QuizFlow, Scheduler,
};

mod scripts;

pub(crate) use scripts::scroll_into_view_script;
use scripts::{form_mount_script, form_unmount_script, track_script};

/// Lifecycle callbacks from the embedded form, tagged with their mount.
pub type FormEventSender = UnboundedSender<(MountTicket, LeadCaptureEvent)>;

/// Forwards records to `window.analytics.track` when the page has one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptAnalyticsSink;

impl AnalyticsSink for ScriptAnalyticsSink {
    fn send(&self, record: &EventRecord) -> Result<(), AnalyticsError> {
        let properties = serde_json::to_string(&record.properties)?;
        let _ = eval(&track_script(record.name, &properties));
        Ok(())
    }
}

/// The ticket of the form currently mounted, if any.
#[derive(Debug, Clone)]
struct ActiveMount(Arc<watch::Sender<Option<MountTicket>>>);

impl ActiveMount {
    fn new() -> Self {
        Self(Arc::new(watch::Sender::new(None)))
    }

    fn begin(&self, ticket: MountTicket) -> watch::Receiver<Option<MountTicket>> {
        self.0.send_replace(Some(ticket));
        self.0.subscribe()
    }

    fn release(&self) {
        self.0.send_replace(None);
    }
}

/// Resolves once `ticket` is no longer the mounted form.
async fn released(mut active: watch::Receiver<Option<MountTicket>>, ticket: MountTicket) {
    let _ = active.wait_for(|current| *current != Some(ticket)).await;
}

/// Embeds the third-party signup form into the modal container.
#[derive(Debug, Clone)]
pub struct ScriptFormProvider {
    script_url: String,
    events: FormEventSender,
    active: ActiveMount,
}

impl ScriptFormProvider {
    #[must_use]
    pub fn new(script_url: impl Into<String>, events: FormEventSender) -> Self {
        Self {
            script_url: script_url.into(),
            events,
            active: ActiveMount::new(),
        }
    }
}

/// Map a message from the mount script. Failures carry their cause.
fn parse_form_message(
    message: &str,
    script_url: &str,
    container: &ContainerId,
) -> Option<Result<LeadCaptureEvent, LeadCaptureError>> {
    match message {
        "ready" => Some(Ok(LeadCaptureEvent::Ready)),
        "submitted" => Some(Ok(LeadCaptureEvent::Submitted)),
        "completed" => Some(Ok(LeadCaptureEvent::SubmissionCompleted)),
        "failed:script" => Some(Err(LeadCaptureError::ScriptLoad(script_url.to_string()))),
        "failed:container" => Some(Err(LeadCaptureError::MissingContainer(
            container.to_string(),
        ))),
        "failed" => Some(Err(LeadCaptureError::ProviderUnavailable)),
        _ => None,
    }
}

impl LeadCaptureProvider for ScriptFormProvider {
    fn mount(&self, request: &MountRequest<'_>) -> Result<(), LeadCaptureError> {
        if self.script_url.trim().is_empty() {
            return Err(LeadCaptureError::ProviderUnavailable);
        }
        let mut form = eval(&form_mount_script(
            &self.script_url,
            request.form,
            request.container,
        ));
        let events = self.events.clone();
        let ticket = request.ticket;
        let script_url = self.script_url.clone();
        let container = request.container.clone();
        let active = self.active.begin(ticket);
        spawn(async move {
            let mut unmounted = std::pin::pin!(released(active, ticket));
            loop {
                let received = tokio::select! {
                    () = &mut unmounted => {
                        tracing::debug!(%ticket, "form unmounted, dropping listener");
                        break;
                    }
                    received = form.recv::<String>() => received,
                };
                let event = match received {
                    Ok(message) => match parse_form_message(&message, &script_url, &container) {
                        Some(Ok(event)) => event,
                        Some(Err(err)) => {
                            tracing::warn!(%ticket, error = %err, "lead-capture form failed");
                            LeadCaptureEvent::Failed
                        }
                        None => {
                            tracing::debug!(%ticket, message, "unrecognised form message");
                            continue;
                        }
                    },
                    Err(err) => {
                        tracing::debug!(%ticket, error = ?err, "form channel closed");
                        LeadCaptureEvent::Failed
                    }
                };
                if events.send((ticket, event)).is_err() {
                    break;
                }
                if matches!(
                    event,
                    LeadCaptureEvent::SubmissionCompleted | LeadCaptureEvent::Failed
                ) {
                    break;
                }
            }
        });
        Ok(())
    }

    fn unmount(&self, container: &ContainerId) {
        self.active.release();
        let _ = eval(&form_unmount_script(container));
    }
}

/// Runs deferred flow work on the UI runtime.
#[derive(Clone, Copy)]
pub struct UiScheduler {
    flow: Signal<QuizFlow>,
}

impl UiScheduler {
    #[must_use]
    pub fn new(flow: Signal<QuizFlow>) -> Self {
        Self { flow }
    }
}

impl Scheduler for UiScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        let scheduler = *self;
        let mut flow = self.flow;
        spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let Ok(mut flow) = flow.try_write() else {
                tracing::debug!(kind = ?task.kind(), "flow dropped before deferred task");
                return;
            };
            flow.fire(task, &scheduler);
        });
    }
}
