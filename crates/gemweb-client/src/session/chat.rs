//! Sending turns through a ChatSession.

use std::path::PathBuf;

use tracing::debug;

use crate::models::ModelOutput;
use crate::{ContentGenerator, GeminiError};

use super::manager::ChatSession;
use super::types::BusyGuard;

impl ChatSession {
    /// Send one turn from the current triple.
    ///
    /// On success the triple becomes the reply's metadata pair plus the
    /// chosen candidate's id. On any failure it is left exactly as it was,
    /// so a retry resumes from the last good point.
    pub async fn send_turn(
        &self,
        client: &dyn ContentGenerator,
        prompt: &str,
        attachments: &[PathBuf],
    ) -> Result<ModelOutput, GeminiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let state = self.state();
        let output = client.generate(prompt, attachments, &state).await?;

        let next = output.session_state();
        debug!(
            new_conversation = state.is_new(),
            candidates = output.candidates.len(),
            "turn complete"
        );

        let mut turn = self.lock();
        turn.state = next;
        turn.last_output = Some(output.clone());
        Ok(output)
    }
}
