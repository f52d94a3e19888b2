use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{Clock, HostSink, PanelService, RecordingHost, ScriptedCollaborator};
use vibely_core::panel::{Panel, PanelEvent};
use vibely_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::PanelPage;
use crate::views::panel::PanelTestHandles;

#[derive(Clone)]
struct TestApp {
    panel_service: Arc<PanelService>,
    host: Arc<RecordingHost>,
}

impl UiApp for TestApp {
    fn model_label(&self) -> String {
        "scripted".to_string()
    }

    fn panel_service(&self) -> Arc<PanelService> {
        Arc::clone(&self.panel_service)
    }

    fn host(&self) -> Arc<dyn HostSink> {
        self.host.clone()
    }
}

#[derive(Props, Clone)]
struct PanelHarnessProps {
    app: Arc<TestApp>,
    handles: PanelTestHandles,
}

impl PartialEq for PanelHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PanelHarnessRoot(props: PanelHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { PanelPage {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: PanelTestHandles,
    pub host: Arc<RecordingHost>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn dispatch(&mut self, event: PanelEvent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(event));
        drive_dom(&mut self.dom);
    }

    pub fn panel(&self) -> Signal<Panel> {
        self.handles.panel()
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Give spawned collaborator round trips a few turns to land.
    pub async fn settle(&mut self) {
        for _ in 0..5 {
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

pub fn setup_panel_harness(
    generator: ScriptedCollaborator,
    judge: ScriptedCollaborator,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let panel_service = Arc::new(PanelService::new(
        clock,
        Arc::new(generator),
        Arc::new(judge),
    ));
    let host = Arc::new(RecordingHost::new());
    let handles = PanelTestHandles::default();
    let app = Arc::new(TestApp {
        panel_service,
        host: Arc::clone(&host),
    });

    let mut harness = ViewHarness {
        dom: VirtualDom::new_with_props(
            PanelHarnessRoot,
            PanelHarnessProps {
                app,
                handles: handles.clone(),
            },
        ),
        handles,
        host,
    };
    harness.rebuild();
    harness
}
