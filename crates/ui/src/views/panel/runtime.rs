use std::path::PathBuf;
use std::sync::Arc;

use dioxus::prelude::*;

use services::{HostSink, PanelService};
use vibely_core::panel::{Effect, Panel, PanelEvent};

/// Banner shown above the panel body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Notice {
    Rejected(String),
    Saved(PathBuf),
    Handed,
    HostFailed(String),
}

impl Notice {
    pub(crate) fn message(&self) -> String {
        match self {
            Notice::Rejected(reason) => reason.clone(),
            Notice::Saved(path) => format!("Code saved to {}", path.display()),
            Notice::Handed => "Code sent to the editor.".to_string(),
            Notice::HostFailed(detail) => format!("Could not save the code: {detail}"),
        }
    }

    pub(crate) fn class(&self) -> &'static str {
        match self {
            Notice::Saved(_) | Notice::Handed => "notice notice-info",
            Notice::Rejected(_) | Notice::HostFailed(_) => "notice notice-error",
        }
    }
}

/// Feeds events into the panel and runs the effects it asks for.
///
/// Collaborator round trips are spawned so the rest of the quiz stays
/// interactive; their results come back through `dispatch`.
#[derive(Clone)]
pub(crate) struct PanelRuntime {
    panel: Signal<Panel>,
    notice: Signal<Option<Notice>>,
    service: Arc<PanelService>,
    host: Arc<dyn HostSink>,
}

impl PanelRuntime {
    pub(crate) fn new(
        panel: Signal<Panel>,
        notice: Signal<Option<Notice>>,
        service: Arc<PanelService>,
        host: Arc<dyn HostSink>,
    ) -> Self {
        Self {
            panel,
            notice,
            service,
            host,
        }
    }

    pub(crate) fn dispatch(&self, event: PanelEvent) {
        let now = self.service.clock().now();
        let effects = {
            let mut panel = self.panel;
            let mut guard = panel.write();
            guard.dispatch(event, now)
        };
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&self, effect: Effect) {
        let mut notice = self.notice;
        match effect {
            Effect::RequestGeneration { .. } => {
                notice.set(None);
                self.perform(effect);
            }
            Effect::RequestJudgment(_) => self.perform(effect),
            Effect::Rejected { reason, .. } => {
                notice.set(Some(Notice::Rejected(reason.to_string())));
            }
            Effect::Implement(request) => {
                let host = Arc::clone(&self.host);
                spawn(async move {
                    let outcome = match host.implement(&request).await {
                        Ok(Some(path)) => Notice::Saved(path),
                        Ok(None) => Notice::Handed,
                        Err(err) => {
                            tracing::warn!(error = %err, "host rejected implement request");
                            Notice::HostFailed(err.to_string())
                        }
                    };
                    notice.set(Some(outcome));
                });
            }
            Effect::Graded(_)
            | Effect::Response(_)
            | Effect::SimilarityResult { .. }
            | Effect::Hint { .. } => {}
        }
    }

    fn perform(&self, effect: Effect) {
        let runtime = self.clone();
        spawn(async move {
            if let Some(follow_up) = runtime.service.perform(&effect).await {
                runtime.dispatch(follow_up);
            }
        });
    }
}
