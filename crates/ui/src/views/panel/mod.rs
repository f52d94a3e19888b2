mod prompt;
mod quiz;
mod runtime;

use dioxus::prelude::*;

use vibely_core::model::{Answer, QuestionId};
use vibely_core::panel::{Panel, PanelEvent};

use crate::context::AppContext;
use crate::vm::{PanelBodyVm, map_panel};
use prompt::PromptForm;
use quiz::QuizView;
use runtime::{Notice, PanelRuntime};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn PanelPage() -> Element {
    let ctx = use_context::<AppContext>();
    let panel = use_signal(Panel::new);
    let notice = use_signal(|| None::<Notice>);

    let dispatch = {
        let runtime = PanelRuntime::new(panel, notice, ctx.panel_service(), ctx.host());
        use_callback(move |event: PanelEvent| runtime.dispatch(event))
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PanelTestHandles>() {
                handles.register(dispatch, panel);
            }
        }
    }

    let body = map_panel(&panel.read());
    let working = panel.read().is_working();
    let notice = notice.read().as_ref().map(|notice| (notice.class(), notice.message()));

    rsx! {
        div { class: "page panel-page",
            PromptForm {
                working,
                on_submit: move |text: String| dispatch.call(PanelEvent::Prompt(text)),
            }
            if let Some((class, message)) = notice {
                div { class, role: "status", "{message}" }
            }
            match body {
                PanelBodyVm::Idle => rsx! {
                    p { class: "panel-empty",
                        "Describe the code you want, then answer a few questions about it."
                    }
                },
                PanelBodyVm::Working => rsx! {
                    p { class: "panel-working", "Generating your code and quiz…" }
                },
                PanelBodyVm::Quiz(quiz) => rsx! {
                    QuizView {
                        quiz,
                        on_answer: move |(question_id, answer): (QuestionId, Answer)| {
                            dispatch.call(PanelEvent::SubmitAnswer { question_id, answer });
                        },
                        on_hint: move |question_id: QuestionId| {
                            dispatch.call(PanelEvent::RevealHint(question_id));
                        },
                        on_implement: move |()| dispatch.call(PanelEvent::Implement),
                    }
                },
                PanelBodyVm::Text(text) => rsx! {
                    pre { class: "panel-text", code { "{text}" } }
                },
                PanelBodyVm::Failed(message) => rsx! {
                    div { class: "panel-failed", role: "alert", "{message}" }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PanelTestHandles {
    dispatch: Rc<RefCell<Option<Callback<PanelEvent>>>>,
    panel: Rc<RefCell<Option<Signal<Panel>>>>,
}

#[cfg(test)]
impl PanelTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<PanelEvent>, panel: Signal<Panel>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.panel.borrow_mut() = Some(panel);
    }

    pub(crate) fn dispatch(&self) -> Callback<PanelEvent> {
        (*self.dispatch.borrow()).expect("panel dispatch registered")
    }

    pub(crate) fn panel(&self) -> Signal<Panel> {
        (*self.panel.borrow()).expect("panel signal registered")
    }
}
