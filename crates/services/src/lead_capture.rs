//! Lead-capture modal backed by an embedded third-party form.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::LeadCaptureError;

/// Identifies one mount of the form. Events carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MountTicket(u64);

impl MountTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Region/account/form triple the provider uses to find the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormKey {
    pub region: String,
    pub portal_id: String,
    pub form_id: String,
}

/// DOM id of the element the form is mounted into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(String);

impl ContainerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadCaptureSettings {
    pub form: FormKey,
    pub container: ContainerId,
    /// Direct signup link shown when the form cannot be loaded.
    pub fallback_url: String,
}

#[derive(Debug, Clone, Copy)]
pub struct MountRequest<'a> {
    pub container: &'a ContainerId,
    pub form: &'a FormKey,
    pub ticket: MountTicket,
}

/// Lifecycle callbacks reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadCaptureEvent {
    Ready,
    Submitted,
    SubmissionCompleted,
    /// The provider script or object never became available.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadCaptureStatus {
    #[default]
    Closed,
    Loading,
    Ready,
    Submitting,
    Completed,
    Unavailable,
}

impl LeadCaptureStatus {
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

pub trait LeadCaptureProvider: Send + Sync {
    /// Render the form into `request.container` and report lifecycle events
    /// tagged with `request.ticket`.
    ///
    /// # Errors
    ///
    /// Returns `LeadCaptureError` if the form cannot be mounted at all.
    fn mount(&self, request: &MountRequest<'_>) -> Result<(), LeadCaptureError>;

    /// Remove anything mounted into `container`.
    fn unmount(&self, container: &ContainerId);
}

/// Provider for environments without an embedded form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProvider;

impl LeadCaptureProvider for UnavailableProvider {
    fn mount(&self, _request: &MountRequest<'_>) -> Result<(), LeadCaptureError> {
        Err(LeadCaptureError::ProviderUnavailable)
    }

    fn unmount(&self, _container: &ContainerId) {}
}

/// Modal state plus ownership of the mounted container.
pub struct LeadCapture {
    provider: Arc<dyn LeadCaptureProvider>,
    settings: LeadCaptureSettings,
    status: LeadCaptureStatus,
    ticket: MountTicket,
}

impl LeadCapture {
    #[must_use]
    pub fn new(provider: Arc<dyn LeadCaptureProvider>, settings: LeadCaptureSettings) -> Self {
        Self {
            provider,
            settings,
            status: LeadCaptureStatus::Closed,
            ticket: MountTicket(0),
        }
    }

    #[must_use]
    pub fn status(&self) -> LeadCaptureStatus {
        self.status
    }

    #[must_use]
    pub fn ticket(&self) -> MountTicket {
        self.ticket
    }

    #[must_use]
    pub fn settings(&self) -> &LeadCaptureSettings {
        &self.settings
    }

    /// Mount a fresh form. A mount failure leaves the modal open as unavailable.
    pub fn open(&mut self) -> MountTicket {
        if self.status.is_open() {
            return self.ticket;
        }
        self.ticket = MountTicket(self.ticket.0 + 1);
        self.status = LeadCaptureStatus::Loading;

        let request = MountRequest {
            container: &self.settings.container,
            form: &self.settings.form,
            ticket: self.ticket,
        };
        if let Err(err) = self.provider.mount(&request) {
            tracing::warn!(
                container = %self.settings.container,
                error = %err,
                "lead-capture form unavailable"
            );
            self.status = LeadCaptureStatus::Unavailable;
        }
        self.ticket
    }

    /// Close the modal and release the container.
    pub fn close(&mut self) {
        if self.status.is_open() {
            self.provider.unmount(&self.settings.container);
        }
        self.status = LeadCaptureStatus::Closed;
    }

    /// Apply a provider event. Returns the new status, or `None` if the event was stale.
    pub fn apply(&mut self, ticket: MountTicket, event: LeadCaptureEvent) -> Option<LeadCaptureStatus> {
        if ticket != self.ticket || !self.status.is_open() {
            tracing::debug!(%ticket, current = %self.ticket, ?event, "stale lead-capture event");
            return None;
        }
        self.status = match event {
            LeadCaptureEvent::Ready => LeadCaptureStatus::Ready,
            LeadCaptureEvent::Submitted => LeadCaptureStatus::Submitting,
            LeadCaptureEvent::SubmissionCompleted => LeadCaptureStatus::Completed,
            LeadCaptureEvent::Failed => LeadCaptureStatus::Unavailable,
        };
        Some(self.status)
    }
}

impl fmt::Debug for LeadCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadCapture")
            .field("settings", &self.settings)
            .field("status", &self.status)
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingProvider {
        mounted: Mutex<Vec<MountTicket>>,
        unmounted: Mutex<usize>,
    }

    impl LeadCaptureProvider for CountingProvider {
        fn mount(&self, request: &MountRequest<'_>) -> Result<(), LeadCaptureError> {
            self.mounted.lock().unwrap().push(request.ticket);
            Ok(())
        }

        fn unmount(&self, _container: &ContainerId) {
            *self.unmounted.lock().unwrap() += 1;
        }
    }

    fn settings() -> LeadCaptureSettings {
        LeadCaptureSettings {
            form: FormKey {
                region: "na1".into(),
                portal_id: "1".into(),
                form_id: "f".into(),
            },
            container: ContainerId::new("signup"),
            fallback_url: "https://example.com".into(),
        }
    }

    #[test]
    fn events_for_old_mounts_are_dropped() {
        let provider = Arc::new(CountingProvider::default());
        let mut lead = LeadCapture::new(provider.clone(), settings());

        let first = lead.open();
        lead.close();
        let second = lead.open();
        assert_ne!(first, second);

        assert_eq!(lead.apply(first, LeadCaptureEvent::Ready), None);
        assert_eq!(lead.status(), LeadCaptureStatus::Loading);
        assert_eq!(lead.apply(second, LeadCaptureEvent::Ready), Some(LeadCaptureStatus::Ready));
        assert_eq!(provider.mounted.lock().unwrap().len(), 2);
        assert_eq!(*provider.unmounted.lock().unwrap(), 1);
    }

    #[test]
    fn mount_failure_degrades_to_unavailable() {
        let mut lead = LeadCapture::new(Arc::new(UnavailableProvider), settings());
        lead.open();
        assert_eq!(lead.status(), LeadCaptureStatus::Unavailable);
        lead.close();
        assert_eq!(lead.status(), LeadCaptureStatus::Closed);
    }

    #[test]
    fn events_after_close_are_dropped() {
        let mut lead = LeadCapture::new(Arc::new(CountingProvider::default()), settings());
        let ticket = lead.open();
        lead.close();
        assert_eq!(lead.apply(ticket, LeadCaptureEvent::SubmissionCompleted), None);
        assert_eq!(lead.status(), LeadCaptureStatus::Closed);
    }
}
