use std::sync::Arc;

use services::{HostSink, PanelService};

pub trait UiApp: Send + Sync {
    /// Model name shown in the header.
    fn model_label(&self) -> String;

    fn panel_service(&self) -> Arc<PanelService>;
    fn host(&self) -> Arc<dyn HostSink>;
}

#[derive(Clone)]
pub struct AppContext {
    model_label: String,
    panel_service: Arc<PanelService>,
    host: Arc<dyn HostSink>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            model_label: app.model_label(),
            panel_service: app.panel_service(),
            host: app.host(),
        }
    }

    #[must_use]
    pub fn model_label(&self) -> &str {
        &self.model_label
    }

    #[must_use]
    pub fn panel_service(&self) -> Arc<PanelService> {
        Arc::clone(&self.panel_service)
    }

    #[must_use]
    pub fn host(&self) -> Arc<dyn HostSink> {
        Arc::clone(&self.host)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
