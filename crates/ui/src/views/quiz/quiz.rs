use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use quiz_core::model::CardChoice;
use services::{
    Collaborators, LeadCaptureEvent, LeadCaptureProvider, MountTicket, QuizFlow, SharePlatform,
    UnavailableProvider,
};

use crate::context::AppContext;
use crate::glue::{FormEventSender, ScriptFormProvider, UiScheduler};
use crate::vm::{StageVm, quiz_vm};

use super::cards::CardStep;
use super::lead_modal::LeadModal;
use super::question::QuestionStep;
use super::result::ResultStep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer(usize),
    Card(CardChoice),
    ResultCta,
    Share(SharePlatform),
    OpenSignup,
    CloseSignup,
    Reset,
}

type FormInbox = Rc<RefCell<Option<UnboundedReceiver<(MountTicket, LeadCaptureEvent)>>>>;

fn build_flow(ctx: &AppContext, form_events: FormEventSender) -> QuizFlow {
    let config = ctx.config();
    let forms: std::sync::Arc<dyn LeadCaptureProvider> = if ctx.embed_lead_form() {
        std::sync::Arc::new(ScriptFormProvider::new(
            config.lead_capture.script_url.clone(),
            form_events,
        ))
    } else {
        std::sync::Arc::new(UnavailableProvider)
    };
    QuizFlow::new(
        ctx.catalog(),
        &config,
        Collaborators {
            analytics: ctx.analytics(),
            launcher: ctx.launcher(),
            forms,
        },
    )
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let container_id = ctx.config().lead_capture.container_id.clone();
    let (form_events, form_inbox) = use_hook(|| {
        let (tx, rx) = unbounded_channel();
        (tx, FormInbox::new(RefCell::new(Some(rx))))
    });
    let flow = use_signal(|| build_flow(&ctx, form_events.clone()));

    use_hook(move || {
        if let Some(mut inbox) = form_inbox.borrow_mut().take() {
            spawn(async move {
                while let Some((ticket, event)) = inbox.recv().await {
                    let mut flow = flow;
                    let scheduler = UiScheduler::new(flow);
                    flow.write()
                        .on_lead_capture_event(ticket, event, &scheduler);
                }
            });
        }
    });

    use_drop(move || {
        let mut signal = flow;
        if let Ok(mut flow) = signal.try_write() {
            flow.dispose();
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut flow = flow;
        let scheduler = UiScheduler::new(flow);
        let outcome = match intent {
            QuizIntent::Answer(option) => flow.write().answer(option, &scheduler).map(drop),
            QuizIntent::Card(choice) => flow.write().card_choice(choice, &scheduler).map(drop),
            QuizIntent::ResultCta => flow.read().open_result_cta().map(drop),
            QuizIntent::Share(platform) => flow.read().share(platform).map(drop),
            QuizIntent::OpenSignup => flow.write().open_lead_capture().map(drop),
            QuizIntent::CloseSignup => flow.write().close_lead_capture().map(drop),
            QuizIntent::Reset => flow.write().reset(&scheduler).map(drop),
        };
        if let Err(err) = outcome {
            tracing::warn!(?intent, error = %err, "quiz input rejected");
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, flow);
            }
        }
    }

    let vm = quiz_vm(&flow.read());
    let busy = vm.busy;

    rsx! {
        div { class: "quiz", id: "quiz-root", style: "{vm.timing_style}",
            match vm.stage {
                StageVm::Question(question) => rsx! {
                    QuestionStep { question, busy, on_intent: dispatch }
                },
                StageVm::Cards(card) => rsx! {
                    CardStep { card, busy, on_intent: dispatch }
                },
                StageVm::Result(result) => rsx! {
                    ResultStep { result, busy, on_intent: dispatch }
                },
            }
            LeadModal { modal: vm.modal, container_id, on_intent: dispatch }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    flow: Rc<RefCell<Option<Signal<QuizFlow>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, flow: Signal<QuizFlow>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.flow.borrow_mut() = Some(flow);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn flow(&self) -> Signal<QuizFlow> {
        (*self.flow.borrow()).expect("quiz flow registered")
    }
}
