use std::path::PathBuf;
use std::sync::Arc;

use crate::Clock;
use crate::collaborators::HostSink;
use crate::completions::ChatCompletionsClient;
use crate::config::GenerationConfig;
use crate::driver::PanelDriver;
use crate::error::AppServicesError;
use crate::host::FileHostSink;
use crate::panel_service::PanelService;

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    config: GenerationConfig,
    panel_service: Arc<PanelService>,
    host: Arc<dyn HostSink>,
}

impl AppServices {
    /// Build services backed by the chat-completions client and a file host.
    ///
    /// A missing API key is not an error here: each call reports it instead.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be constructed.
    pub fn new(
        config: GenerationConfig,
        clock: Clock,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self, AppServicesError> {
        if !config.has_credential() {
            tracing::warn!("no API key configured; generation will fail until one is set");
        }
        tracing::info!(
            model = %config.model,
            base_url = %config.base_url,
            "configured chat completions"
        );

        let client = Arc::new(ChatCompletionsClient::try_new(config.clone())?);
        let panel_service = Arc::new(
            PanelService::new(clock, client.clone(), client).with_timeout(config.timeout),
        );
        let host: Arc<dyn HostSink> = Arc::new(FileHostSink::new(out_dir));

        Ok(Self {
            config,
            panel_service,
            host,
        })
    }

    /// Build services from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if configuration is invalid.
    pub fn from_env(
        clock: Clock,
        out_dir: impl Into<PathBuf>,
        model: Option<String>,
    ) -> Result<Self, AppServicesError> {
        let mut config = GenerationConfig::from_env()?;
        if let Some(model) = model {
            config = config.with_model(model);
        }
        Self::new(config, clock, out_dir)
    }

    #[must_use]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    #[must_use]
    pub fn panel_service(&self) -> Arc<PanelService> {
        Arc::clone(&self.panel_service)
    }

    #[must_use]
    pub fn host(&self) -> Arc<dyn HostSink> {
        Arc::clone(&self.host)
    }

    #[must_use]
    pub fn driver(&self) -> PanelDriver {
        PanelDriver::new(self.panel_service(), self.host())
    }
}
