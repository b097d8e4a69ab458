//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::TransitionError;

/// Errors emitted by `QuizFlow` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Errors reported by an analytics sink. Never surfaced past `Analytics`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error("analytics sink is unavailable")]
    Unavailable,
    #[error("analytics payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("analytics sink failed: {0}")]
    Sink(String),
}

/// Errors reported by a share or link launcher.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LaunchError {
    #[error("link launcher is unavailable")]
    Unavailable,
    #[error("launch failed: {0}")]
    Failed(String),
}

/// Errors reported by a lead-capture form provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeadCaptureError {
    #[error("form provider is not available")]
    ProviderUnavailable,
    #[error("form container {0} was not found")]
    MissingContainer(String),
    #[error("form provider script failed to load: {0}")]
    ScriptLoad(String),
}

/// Errors emitted while loading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error("invalid page url: {0}")]
    PageUrl(#[from] url::ParseError),
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}
