//! Fire-and-forget analytics.
//!
//! `Analytics` stamps events with the clock and hands them to an optional sink.
//! Sink failures are logged and dropped; they never reach the quiz flow.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::{AnalyticsEvent, Clock, PropertyValue};

use crate::error::AnalyticsError;

/// An event as delivered to a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub name: &'static str,
    pub properties: BTreeMap<&'static str, PropertyValue>,
    pub occurred_at: DateTime<Utc>,
}

impl EventRecord {
    #[must_use]
    pub fn new(event: &AnalyticsEvent, occurred_at: DateTime<Utc>) -> Self {
        Self {
            name: event.name().as_str(),
            properties: event.properties().clone(),
            occurred_at,
        }
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// Destination for analytics records.
pub trait AnalyticsSink: Send + Sync {
    /// Deliver a record.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError` if the record could not be delivered.
    fn send(&self, record: &EventRecord) -> Result<(), AnalyticsError>;
}

#[derive(Clone)]
pub struct Analytics {
    sink: Option<Arc<dyn AnalyticsSink>>,
    clock: Clock,
}

impl Analytics {
    #[must_use]
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self {
            sink: Some(sink),
            clock: Clock::system(),
        }
    }

    /// Analytics with no sink; every event is a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sink: None,
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn track(&self, event: &AnalyticsEvent) {
        let Some(sink) = self.sink.as_ref() else {
            tracing::trace!(event = event.name().as_str(), "analytics disabled, dropping event");
            return;
        };
        let record = EventRecord::new(event, self.clock.now());
        if let Err(err) = sink.send(&record) {
            tracing::warn!(event = record.name, error = %err, "analytics event dropped");
        }
    }

    pub fn track_all<'a>(&self, events: impl IntoIterator<Item = &'a AnalyticsEvent>) {
        for event in events {
            self.track(event);
        }
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("enabled", &self.is_enabled())
            .field("clock", &self.clock)
            .finish()
    }
}

/// Writes each event as a structured log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn send(&self, record: &EventRecord) -> Result<(), AnalyticsError> {
        let properties = serde_json::to_string(&record.properties)?;
        tracing::info!(
            target: "quiz::analytics",
            event = record.name,
            %properties,
            occurred_at = %record.occurred_at
        );
        Ok(())
    }
}

/// Keeps every record in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.records().iter().map(|record| record.name).collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl AnalyticsSink for RecordingSink {
    fn send(&self, record: &EventRecord) -> Result<(), AnalyticsError> {
        self.records
            .lock()
            .map_err(|_| AnalyticsError::Sink("recording sink poisoned".into()))?
            .push(record.clone());
        Ok(())
    }
}
