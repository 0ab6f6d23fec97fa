//! ChatSession struct and continuation bookkeeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::models::{ModelOutput, SessionState};
use crate::GeminiError;

use super::types::BusyGuard;

#[derive(Debug, Default)]
pub(super) struct Turn {
    /// Triple to echo on the next request.
    pub(super) state: SessionState,
    /// Output of the last successful turn.
    pub(super) last_output: Option<ModelOutput>,
}

/// A conversation with the service.
///
/// Shareable across tasks; at most one turn runs at a time so two requests
/// can never race from the same triple.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub(super) turn: Mutex<Turn>,
    pub(super) busy: AtomicBool,
}

impl ChatSession {
    /// Start a new conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a conversation from a triple the caller persisted.
    pub fn resume(state: SessionState) -> Self {
        Self {
            turn: Mutex::new(Turn {
                state,
                last_output: None,
            }),
            busy: AtomicBool::new(false),
        }
    }

    /// Current continuation triple.
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    pub fn last_output(&self) -> Option<ModelOutput> {
        self.lock().last_output.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Continue from another candidate of the last reply instead of the one
    /// chosen by default. The triple is re-derived from that reply as a
    /// whole; an out-of-range index changes nothing.
    pub fn choose_candidate(&self, index: usize) -> Result<ModelOutput, GeminiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        let mut turn = self.lock();

        let mut output = turn
            .last_output
            .clone()
            .ok_or(GeminiError::InvalidCandidate { index, count: 0 })?;
        output.choose(index)?;

        debug!(index, "switched continuation candidate");
        turn.state = output.session_state();
        turn.last_output = Some(output.clone());
        Ok(output)
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Turn> {
        self.turn.lock().unwrap_or_else(|e| e.into_inner())
    }
}
