//! Completion gate: unlocks the "implement" action once every question is correct.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{CodeBlock, SessionId};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateError {
    #[error("answer every question correctly before implementing")]
    Locked,
}

/// Emitted exactly once per quiz, on the false→true flip of `all_correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUnlocked {
    pub session_id: SessionId,
    pub unlocked_at: DateTime<Utc>,
}

/// Code payload handed to the host when the user proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementRequest {
    pub session_id: SessionId,
    pub code: CodeBlock,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionGate {
    unlocked_at: Option<DateTime<Utc>>,
}

impl CompletionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the freshly recomputed aggregate. Returns the unlock event only on
    /// the first observation of `all_correct == true`; the gate never relocks.
    pub fn observe(
        &mut self,
        session_id: SessionId,
        all_correct: bool,
        now: DateTime<Utc>,
    ) -> Option<CompletionUnlocked> {
        if !all_correct || self.unlocked_at.is_some() {
            return None;
        }
        self.unlocked_at = Some(now);
        Some(CompletionUnlocked {
            session_id,
            unlocked_at: now,
        })
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    #[must_use]
    pub fn unlocked_at(&self) -> Option<DateTime<Utc>> {
        self.unlocked_at
    }

    /// # Errors
    ///
    /// Returns `GateError::Locked` until the gate has unlocked.
    pub fn proceed(
        &self,
        session_id: SessionId,
        code: &CodeBlock,
    ) -> Result<ImplementRequest, GateError> {
        if !self.is_unlocked() {
            return Err(GateError::Locked);
        }
        Ok(ImplementRequest {
            session_id,
            code: code.clone(),
        })
    }
}
