use serde::{Deserialize, Serialize};

use crate::model::ids::ResultId;

/// A labelled link shown on a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub url: String,
}

impl CallToAction {
    #[must_use]
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One of the canned outcomes a quiz session resolves to.
///
/// Entries double as the swipe cards, so catalog order is also card order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub id: ResultId,
    pub emoji: String,
    pub title: String,
    /// Shown as the "Age:" line.
    pub subtitle: String,
    /// May contain embedded line breaks.
    pub description: String,
    pub call_to_action: CallToAction,
    pub secondary_call_to_action: Option<CallToAction>,
}

impl ResultEntry {
    #[must_use]
    pub fn new(
        id: impl Into<ResultId>,
        emoji: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        description: impl Into<String>,
        call_to_action: CallToAction,
    ) -> Self {
        Self {
            id: id.into(),
            emoji: emoji.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            description: description.into(),
            call_to_action,
            secondary_call_to_action: None,
        }
    }

    #[must_use]
    pub fn with_secondary(mut self, cta: CallToAction) -> Self {
        self.secondary_call_to_action = Some(cta);
        self
    }

    /// Description split on embedded line breaks, for renderers without `pre-line`.
    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.lines()
    }
}
