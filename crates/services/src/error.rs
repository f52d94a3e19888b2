//! Shared error types for the services crate.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use vibely_core::CollaboratorFailure;

/// Errors emitted by the generation and grading collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("no API key configured; set VIBELY_API_KEY or OPENAI_API_KEY")]
    MissingCredential,
    #[error("request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Unavailable(String),
}

impl From<GenerationError> for CollaboratorFailure {
    fn from(err: GenerationError) -> Self {
        CollaboratorFailure::new(err.to_string())
    }
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Errors emitted by host sinks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HostError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
