use std::fmt;

use thiserror::Error;

use crate::gate::GateError;
use crate::grading::GradingError;

/// Why the panel refused an inbound event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PanelError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("no quiz is active")]
    NoActiveQuiz,
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error(transparent)]
    Gate(#[from] GateError),
}

/// Failure reported by an outbound collaborator (generation or judgment).
///
/// The core only needs the diagnostic text: it is shown verbatim for generation
/// failures and collapses to an incorrect verdict for judgments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollaboratorFailure(String);

impl CollaboratorFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollaboratorFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CollaboratorFailure {}
