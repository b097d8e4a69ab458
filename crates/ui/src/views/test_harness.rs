use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Catalog;
use quiz_core::TransitionTimings;
use quiz_core::time::fixed_clock;
use services::{Analytics, LogLauncher, QuizConfig, RecordingSink, ShareLauncher};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{LandingView, QuizIntent, QuizView};

struct TestApp {
    config: Arc<QuizConfig>,
    catalog: Arc<Catalog>,
    sink: RecordingSink,
}

impl UiApp for TestApp {
    fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn analytics(&self) -> Analytics {
        Analytics::new(Arc::new(self.sink.clone())).with_clock(fixed_clock())
    }

    fn launcher(&self) -> Arc<dyn ShareLauncher> {
        Arc::new(LogLauncher)
    }

    fn embed_lead_form(&self) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub sink: RecordingSink,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Dispatch an intent and let every zero-delay transition run out.
    pub async fn send(&mut self, intent: QuizIntent) {
        self.handles.dispatch().call(intent);
        drive_dom(&mut self.dom);
        for _ in 0..8 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn instant_config() -> QuizConfig {
    QuizConfig {
        timings: TransitionTimings::instant().into(),
        ..QuizConfig::default()
    }
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let sink = RecordingSink::new();
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        config: Arc::new(instant_config()),
        catalog: Arc::new(Catalog::data_match()),
        sink: sink.clone(),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, sink, handles }
}
