//! Social sharing and outbound links.

use url::Url;

use quiz_core::EventName;

use crate::error::LaunchError;

const LINKEDIN_SHARE: &str = "https://www.linkedin.com/sharing/share-offsite/";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    LinkedIn,
    X,
}

impl SharePlatform {
    #[must_use]
    pub const fn event_name(self) -> EventName {
        match self {
            Self::LinkedIn => EventName::ShareLinkedin,
            Self::X => EventName::ShareTwitter,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LinkedIn => "Share on LinkedIn",
            Self::X => "Share on X",
        }
    }
}

/// Build the platform share URL for `page_url`.
///
/// LinkedIn only takes the page; X also carries the caption.
#[must_use]
pub fn share_url(platform: SharePlatform, page_url: &Url, caption: &str) -> Url {
    match platform {
        SharePlatform::LinkedIn => {
            let mut url = Url::parse(LINKEDIN_SHARE).unwrap_or_else(|_| page_url.clone());
            url.query_pairs_mut().append_pair("url", page_url.as_str());
            url
        }
        SharePlatform::X => {
            let mut url = Url::parse(TWITTER_INTENT).unwrap_or_else(|_| page_url.clone());
            url.query_pairs_mut()
                .append_pair("text", caption)
                .append_pair("url", page_url.as_str());
            url
        }
    }
}

/// Opens a URL in a new browsing context. No response is consumed.
pub trait ShareLauncher: Send + Sync {
    /// # Errors
    ///
    /// Returns `LaunchError` if the URL could not be handed off.
    fn open(&self, url: &Url) -> Result<(), LaunchError>;
}

/// Logs the URL instead of opening it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLauncher;

impl ShareLauncher for LogLauncher {
    fn open(&self, url: &Url) -> Result<(), LaunchError> {
        tracing::info!(%url, "open link");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://atlan.com/regovern-quiz/?utm=a b").unwrap()
    }

    #[test]
    fn linkedin_url_carries_encoded_page() {
        let url = share_url(SharePlatform::LinkedIn, &page(), "ignored");
        assert_eq!(url.host_str(), Some("www.linkedin.com"));
        assert_eq!(url.path(), "/sharing/share-offsite/");
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [("url".to_string(), "https://atlan.com/regovern-quiz/?utm=a%20b".to_string())]
        );
        assert!(!url.as_str().contains("ignored"));
    }

    #[test]
    fn twitter_url_carries_caption_and_page() {
        let caption = "I just found my perfect data match! Take the quiz to find yours.";
        let url = share_url(SharePlatform::X, &page(), caption);
        assert_eq!(url.host_str(), Some("twitter.com"));
        assert_eq!(url.path(), "/intent/tweet");
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("text".to_string(), caption.to_string()));
        assert_eq!(pairs[1].0, "url");
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn platforms_map_to_events() {
        assert_eq!(SharePlatform::LinkedIn.event_name().as_str(), "share_linkedin");
        assert_eq!(SharePlatform::X.event_name().as_str(), "share_twitter");
    }
}
