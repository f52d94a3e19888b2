#![forbid(unsafe_code)]

pub mod app_services;
pub mod collaborators;
pub mod completions;
pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod panel_service;
pub mod prompts;

pub use vibely_core::Clock;

pub use app_services::AppServices;
pub use collaborators::{AnswerJudge, HostSink, QuizGenerator, RecordingHost, ScriptedCollaborator};
pub use completions::ChatCompletionsClient;
pub use config::GenerationConfig;
pub use driver::PanelDriver;
pub use error::{AppServicesError, ConfigError, GenerationError, HostError};
pub use host::FileHostSink;
pub use panel_service::PanelService;
