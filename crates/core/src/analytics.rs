//! Analytics vocabulary shared by the flow engine and its sinks.

use std::collections::BTreeMap;

use serde::Serialize;

/// Names of every event the quiz emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
    QuizAnswer,
    CardSwipe,
    QuizComplete,
    QuizReset,
    ShareLinkedin,
    ShareTwitter,
    ResultCtaClick,
    RegovernSignupClick,
    RegovernSignupComplete,
}

impl EventName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuizAnswer => "quiz_answer",
            Self::CardSwipe => "card_swipe",
            Self::QuizComplete => "quiz_complete",
            Self::QuizReset => "quiz_reset",
            Self::ShareLinkedin => "share_linkedin",
            Self::ShareTwitter => "share_twitter",
            Self::ResultCtaClick => "result_cta_click",
            Self::RegovernSignupClick => "regovern_signup_click",
            Self::RegovernSignupComplete => "regovern_signup_complete",
        }
    }
}

/// A primitive property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Flag(bool),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<usize> for PropertyValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// A named event with its properties, before it is stamped and sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    name: EventName,
    properties: BTreeMap<&'static str, PropertyValue>,
}

impl AnalyticsEvent {
    #[must_use]
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: &'static str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> EventName {
        self.name
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<&'static str, PropertyValue> {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
