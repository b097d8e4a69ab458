//! Runtime configuration, loaded from TOML. Every field has a default.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use quiz_core::TransitionTimings;

use crate::error::ConfigError;
use crate::lead_capture::{ContainerId, FormKey, LeadCaptureSettings};

pub const DEFAULT_PAGE_URL: &str = "https://atlan.com/regovern-quiz/";
pub const DEFAULT_SHARE_CAPTION: &str =
    "I just found my perfect data match! Take the quiz to find yours.";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingsConfig {
    pub question_exit_ms: u64,
    pub question_settle_ms: u64,
    pub card_swipe_ms: u64,
    pub card_settle_ms: u64,
    pub result_reveal_delay_ms: u64,
    pub result_fade_ms: u64,
    pub lead_capture_close_delay_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self::from(TransitionTimings::default())
    }
}

impl From<TransitionTimings> for TimingsConfig {
    fn from(timings: TransitionTimings) -> Self {
        let ms = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            question_exit_ms: ms(timings.question_exit),
            question_settle_ms: ms(timings.question_settle),
            card_swipe_ms: ms(timings.card_swipe),
            card_settle_ms: ms(timings.card_settle),
            result_reveal_delay_ms: ms(timings.result_reveal_delay),
            result_fade_ms: ms(timings.result_fade),
            lead_capture_close_delay_ms: ms(timings.lead_capture_close_delay),
        }
    }
}

impl TimingsConfig {
    #[must_use]
    pub fn to_timings(&self) -> TransitionTimings {
        TransitionTimings {
            question_exit: Duration::from_millis(self.question_exit_ms),
            question_settle: Duration::from_millis(self.question_settle_ms),
            card_swipe: Duration::from_millis(self.card_swipe_ms),
            card_settle: Duration::from_millis(self.card_settle_ms),
            result_reveal_delay: Duration::from_millis(self.result_reveal_delay_ms),
            result_fade: Duration::from_millis(self.result_fade_ms),
            lead_capture_close_delay: Duration::from_millis(self.lead_capture_close_delay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeadCaptureConfig {
    pub region: String,
    pub portal_id: String,
    pub form_id: String,
    pub container_id: String,
    pub script_url: String,
    pub fallback_url: String,
}

impl Default for LeadCaptureConfig {
    fn default() -> Self {
        Self {
            region: "na1".into(),
            portal_id: "20207957".into(),
            form_id: "regovern-quiz-signup".into(),
            container_id: "regovern-signup-form".into(),
            script_url: "https://js.hsforms.net/forms/embed/v2.js".into(),
            fallback_url: "https://atlan.com/regovern?ref=regovern-quiz".into(),
        }
    }
}

impl LeadCaptureConfig {
    #[must_use]
    pub fn settings(&self) -> LeadCaptureSettings {
        LeadCaptureSettings {
            form: FormKey {
                region: self.region.clone(),
                portal_id: self.portal_id.clone(),
                form_id: self.form_id.clone(),
            },
            container: ContainerId::new(self.container_id.clone()),
            fallback_url: self.fallback_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuizConfig {
    pub page_url: Url,
    pub share_caption: String,
    pub timings: TimingsConfig,
    pub lead_capture: LeadCaptureConfig,
    pub analytics: AnalyticsConfig,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            share_caption: DEFAULT_SHARE_CAPTION.into(),
            timings: TimingsConfig::default(),
            lead_capture: LeadCaptureConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

fn default_page_url() -> Url {
    Url::parse(DEFAULT_PAGE_URL).expect("default page url should be valid")
}

impl QuizConfig {
    /// Parse configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys, and
    /// `ConfigError::Empty` for blank required strings.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Replace the page URL used for sharing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PageUrl` if `raw` is not an absolute URL.
    pub fn set_page_url(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.page_url = Url::parse(raw.trim())?;
        Ok(())
    }

    #[must_use]
    pub fn timings(&self) -> TransitionTimings {
        self.timings.to_timings()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("share_caption", &self.share_caption),
            ("lead_capture.portal_id", &self.lead_capture.portal_id),
            ("lead_capture.form_id", &self.lead_capture.form_id),
            ("lead_capture.container_id", &self.lead_capture.container_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = QuizConfig::from_toml_str("").unwrap();
        assert_eq!(config, QuizConfig::default());
        assert_eq!(config.timings(), TransitionTimings::default());
        assert_eq!(config.page_url.as_str(), DEFAULT_PAGE_URL);
    }

    #[test]
    fn default_page_url_constant_parses() {
        let url = Url::parse(DEFAULT_PAGE_URL).unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(default_page_url(), url);
    }

    #[test]
    fn timings_section_round_trips_instant_timings() {
        let section = TimingsConfig::from(TransitionTimings::instant());
        assert_eq!(section.card_swipe_ms, 0);
        assert_eq!(section.lead_capture_close_delay_ms, 0);
        assert_eq!(section.to_timings(), TransitionTimings::instant());
        assert_eq!(TimingsConfig::default().to_timings(), TransitionTimings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = QuizConfig::from_toml_str(
            r#"
            page_url = "https://example.com/quiz"

            [timings]
            card_swipe_ms = 10

            [analytics]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.page_url.as_str(), "https://example.com/quiz");
        assert_eq!(config.timings().card_swipe, Duration::from_millis(10));
        assert_eq!(config.timings().question_exit, Duration::from_millis(300));
        assert!(!config.analytics.enabled);
        assert_eq!(config.lead_capture, LeadCaptureConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = QuizConfig::from_toml_str("[timings]\nswipe = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn blank_form_id_is_rejected() {
        let err = QuizConfig::from_toml_str("[lead_capture]\nform_id = \" \"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Empty {
                field: "lead_capture.form_id"
            }
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "share_caption = \"hello\"\n").unwrap();
        let config = QuizConfig::load(&path).unwrap();
        assert_eq!(config.share_caption, "hello");

        let err = QuizConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn page_url_override_must_be_absolute() {
        let mut config = QuizConfig::default();
        config.set_page_url("https://example.com/x").unwrap();
        assert_eq!(config.page_url.as_str(), "https://example.com/x");
        assert!(matches!(config.set_page_url("not a url"), Err(ConfigError::PageUrl(_))));
    }
}
