use std::collections::VecDeque;
use std::sync::Arc;

use vibely_core::panel::{Effect, Panel, PanelEvent};
use vibely_core::protocol::{HostMessage, PanelMessage};

use crate::collaborators::HostSink;
use crate::panel_service::PanelService;

/// Headless panel: owns the panel state and awaits every round trip in turn.
///
/// Used by the stdio host and by integration tests. Events are handled one at a
/// time; collaborator results are fed back before the next inbound event.
pub struct PanelDriver {
    panel: Panel,
    service: Arc<PanelService>,
    host: Arc<dyn HostSink>,
}

impl PanelDriver {
    #[must_use]
    pub fn new(service: Arc<PanelService>, host: Arc<dyn HostSink>) -> Self {
        Self {
            panel: Panel::new(),
            service,
            host,
        }
    }

    #[must_use]
    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Dispatch `event` and everything it triggers. Returns the effects a host
    /// would see, in order.
    pub async fn handle(&mut self, event: PanelEvent) -> Vec<Effect> {
        let mut queue = VecDeque::from([event]);
        let mut visible = Vec::new();

        while let Some(event) = queue.pop_front() {
            let now = self.service.clock().now();
            for effect in self.panel.dispatch(event, now) {
                if let Some(follow_up) = self.service.perform(&effect).await {
                    queue.push_back(follow_up);
                    continue;
                }
                if let Effect::Implement(request) = &effect {
                    match self.host.implement(request).await {
                        Ok(Some(path)) => {
                            tracing::info!(path = %path.display(), "code handed to host");
                        }
                        Ok(None) => {}
                        Err(err) => tracing::error!(error = %err, "host rejected code"),
                    }
                }
                visible.push(effect);
            }
        }

        visible
    }

    /// Entry point for hosts speaking the JSON message protocol.
    pub async fn handle_message(&mut self, message: HostMessage) -> Vec<PanelMessage> {
        self.handle(message.into_event())
            .await
            .iter()
            .filter_map(PanelMessage::from_effect)
            .collect()
    }
}
