//! Data types exchanged with callers.

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::GeminiError;

/// Opaque id returned by the upload endpoint.
pub type UploadedFileRef = String;

/// Continuation triple issued by the server.
///
/// All fields absent means "start a new conversation".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub cid: Option<String>,
    pub rid: Option<String>,
    pub rcid: Option<String>,
}

impl SessionState {
    pub fn new(
        cid: impl Into<String>,
        rid: impl Into<String>,
        rcid: impl Into<String>,
    ) -> Self {
        Self {
            cid: Some(cid.into()),
            rid: Some(rid.into()),
            rcid: Some(rcid.into()),
        }
    }

    /// True when no conversation has been started yet.
    pub fn is_new(&self) -> bool {
        self.cid.is_none()
    }
}

/// An image attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub alt: String,
}

/// An image produced by the model. The image host requires the same web
/// session cookies as the chat itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(flatten)]
    pub image: Image,
    pub cookies: Credentials,
}

/// One alternative answer for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub rcid: String,
    pub text: String,
    pub reasoning: Option<String>,
    pub web_images: Vec<Image>,
    pub generated_images: Vec<GeneratedImage>,
}

impl Candidate {
    /// Web images followed by generated images.
    pub fn images(&self) -> Vec<&Image> {
        self.web_images
            .iter()
            .chain(self.generated_images.iter().map(|g| &g.image))
            .collect()
    }
}

/// Decoded result of a generate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOutput {
    /// Fresh continuation metadata, in server order (cid, rid, ...).
    pub metadata: Vec<String>,
    pub candidates: Vec<Candidate>,
    pub chosen: usize,
}

impl ModelOutput {
    pub fn new(metadata: Vec<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            metadata,
            candidates,
            chosen: 0,
        }
    }

    pub fn chosen_candidate(&self) -> Option<&Candidate> {
        self.candidates.get(self.chosen)
    }

    pub fn text(&self) -> Option<&str> {
        self.chosen_candidate().map(|c| c.text.as_str())
    }

    pub fn rcid(&self) -> Option<&str> {
        self.chosen_candidate().map(|c| c.rcid.as_str())
    }

    pub fn images(&self) -> Vec<&Image> {
        self.chosen_candidate()
            .map(Candidate::images)
            .unwrap_or_default()
    }

    /// Select a different candidate for the continuation.
    pub fn choose(&mut self, index: usize) -> Result<(), GeminiError> {
        if index >= self.candidates.len() {
            return Err(GeminiError::InvalidCandidate {
                index,
                count: self.candidates.len(),
            });
        }
        self.chosen = index;
        Ok(())
    }

    /// The triple to send with the next turn: metadata pair plus the chosen
    /// candidate's id.
    pub fn session_state(&self) -> SessionState {
        SessionState {
            cid: self.metadata.first().cloned(),
            rid: self.metadata.get(1).cloned(),
            rcid: self.rcid().map(String::from),
        }
    }
}
