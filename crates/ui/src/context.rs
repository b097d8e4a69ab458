use std::sync::Arc;

use quiz_core::model::Catalog;
use services::{Analytics, QuizConfig, ShareLauncher};

pub trait UiApp: Send + Sync {
    fn config(&self) -> Arc<QuizConfig>;
    fn catalog(&self) -> Arc<Catalog>;
    fn analytics(&self) -> Analytics;
    fn launcher(&self) -> Arc<dyn ShareLauncher>;

    /// Whether the signup modal should embed the third-party form.
    fn embed_lead_form(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    config: Arc<QuizConfig>,
    catalog: Arc<Catalog>,
    analytics: Analytics,
    launcher: Arc<dyn ShareLauncher>,
    embed_lead_form: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            config: app.config(),
            catalog: app.catalog(),
            analytics: app.analytics(),
            launcher: app.launcher(),
            embed_lead_form: app.embed_lead_form(),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn analytics(&self) -> Analytics {
        self.analytics.clone()
    }

    #[must_use]
    pub fn launcher(&self) -> Arc<dyn ShareLauncher> {
        Arc::clone(&self.launcher)
    }

    #[must_use]
    pub fn embed_lead_form(&self) -> bool {
        self.embed_lead_form
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
