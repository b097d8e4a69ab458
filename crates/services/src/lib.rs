#![forbid(unsafe_code)]

pub mod analytics;
pub mod config;
pub mod error;
pub mod flow;
pub mod lead_capture;
pub mod scheduler;
pub mod share;

pub use quiz_core::Clock;

pub use analytics::{Analytics, AnalyticsSink, EventRecord, RecordingSink, TracingSink};
pub use config::QuizConfig;
pub use error::{AnalyticsError, ConfigError, FlowError, LaunchError, LeadCaptureError};
pub use flow::{Collaborators, Dispatch, QuizFlow};
pub use lead_capture::{
    ContainerId, FormKey, LeadCaptureEvent, LeadCaptureProvider, LeadCaptureStatus, MountRequest,
    MountTicket, UnavailableProvider,
};
pub use scheduler::{Deferred, DeferredTask, ManualScheduler, Scheduler};
pub use share::{LogLauncher, ShareLauncher, SharePlatform};
