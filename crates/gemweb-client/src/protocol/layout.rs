//! Positional layout of the generate endpoint's request and response.
//!
//! The endpoint has no schema: every field is addressed by array position
//! and the positions change between server builds. All of those positions,
//! plus the opaque constants the request must carry, live in one
//! `WireLayout` value tagged with the build it was captured from. A server
//! update should only ever require a new table here.

use serde_json::Value;

/// A fixed value reproduced verbatim in the request envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Null,
    Int(i64),
}

impl Constant {
    pub fn to_value(self) -> Value {
        match self {
            Constant::Null => Value::Null,
            Constant::Int(n) => Value::from(n),
        }
    }
}

/// Path of array indices from one node to another.
pub type Path = &'static [usize];

#[derive(Debug, Clone)]
pub struct WireLayout {
    /// Build label this table was captured from; sent as `bl`.
    pub build_label: &'static str,
    pub session_id: &'static str,
    pub request_id: &'static str,

    // Request side.
    /// Follows the prompt when attachments are present, before the file list.
    pub attachment_marker: &'static [Constant],
    /// Follows the prompt when there are no attachments.
    pub prompt_filler: &'static [Constant],
    /// Triple sent while no conversation exists yet.
    pub new_conversation: [&'static str; 3],
    /// Appended after the triple.
    pub envelope_tail: &'static [Constant],

    // Response side.
    /// Line of the response body holding the chunk array.
    pub payload_line: usize,
    /// JSON-encoded body string inside a chunk.
    pub chunk_body: Path,
    pub body_metadata: Path,
    pub body_candidates: Path,

    pub candidate_rcid: Path,
    pub candidate_text: Path,
    /// Replacement text when `candidate_text` is only a card link.
    pub candidate_card_text: Path,
    pub candidate_reasoning: Path,
    pub candidate_web_images: Path,
    pub candidate_generated_images: Path,

    pub web_image_url: Path,
    pub web_image_title: Path,
    pub web_image_alt: Path,

    pub generated_image_url: Path,
    pub generated_image_label: Path,
    /// Array of alt texts, indexed by image position.
    pub generated_image_alts: Path,
}

pub const CURRENT: WireLayout = WireLayout {
    build_label: "boq_assistant-bard-web-server_20240625.13_p0",
    session_id: "-4865410437186416000",
    request_id: "100000",

    attachment_marker: &[Constant::Int(0), Constant::Null],
    prompt_filler: &[
        Constant::Int(0),
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Int(0),
    ],
    new_conversation: ["", "", ""],
    envelope_tail: &[
        Constant::Null,
        Constant::Int(1),
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Null,
        Constant::Int(0),
        Constant::Null,
        Constant::Int(1),
    ],

    payload_line: 2,
    chunk_body: &[2],
    body_metadata: &[1],
    body_candidates: &[4],

    candidate_rcid: &[0],
    candidate_text: &[1, 0],
    candidate_card_text: &[22, 0],
    candidate_reasoning: &[37, 0, 0],
    candidate_web_images: &[12, 1],
    candidate_generated_images: &[12, 7, 0],

    web_image_url: &[0, 0, 0],
    web_image_title: &[7, 0],
    web_image_alt: &[0, 4],

    generated_image_url: &[0, 3, 3],
    generated_image_label: &[3, 6],
    generated_image_alts: &[3, 5],
};

/// Walk `path` through nested arrays. Any miss, including a `null` at the
/// end, yields `None`.
pub fn value_at<'a>(root: &'a Value, path: &[usize]) -> Option<&'a Value> {
    let mut node = root;
    for &index in path {
        node = node.as_array()?.get(index)?;
    }
    if node.is_null() {
        None
    } else {
        Some(node)
    }
}

pub fn str_at<'a>(root: &'a Value, path: &[usize]) -> Option<&'a str> {
    value_at(root, path)?.as_str()
}

pub fn array_at<'a>(root: &'a Value, path: &[usize]) -> Option<&'a Vec<Value>> {
    value_at(root, path)?.as_array()
}
