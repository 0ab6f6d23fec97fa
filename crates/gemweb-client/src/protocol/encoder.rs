//! Builds the `f.req` form value for a generate call.
//!
//! The endpoint expects the turn as a JSON list serialized to a string,
//! wrapped as `[null, <string>]` and serialized again. Both layers must be
//! compact and byte-exact.

use serde_json::Value;

use super::layout::{Constant, WireLayout, CURRENT};
use crate::models::{SessionState, UploadedFileRef};

/// An uploaded file as it appears in the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_ref: UploadedFileRef,
    pub filename: String,
}

impl Attachment {
    pub fn new(file_ref: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            file_ref: file_ref.into(),
            filename: filename.into(),
        }
    }
}

/// Encode with the current wire layout.
pub fn encode(prompt: &str, attachments: &[Attachment], state: &SessionState, locale: &str) -> String {
    encode_with(&CURRENT, prompt, attachments, state, locale)
}

pub fn encode_with(
    layout: &WireLayout,
    prompt: &str,
    attachments: &[Attachment],
    state: &SessionState,
    locale: &str,
) -> String {
    let mut turn = vec![Value::from(prompt)];
    if attachments.is_empty() {
        turn.extend(constants(layout.prompt_filler));
    } else {
        turn.extend(constants(layout.attachment_marker));
        let files = attachments
            .iter()
            .map(|a| {
                Value::Array(vec![
                    Value::Array(vec![Value::from(a.file_ref.as_str())]),
                    Value::from(a.filename.as_str()),
                ])
            })
            .collect();
        turn.push(Value::Array(files));
    }

    let mut envelope = vec![
        Value::Array(turn),
        Value::Array(vec![Value::from(locale)]),
        triple(layout, state),
    ];
    envelope.extend(constants(layout.envelope_tail));

    let inner = Value::Array(envelope).to_string();
    Value::Array(vec![Value::Null, Value::String(inner)]).to_string()
}

fn triple(layout: &WireLayout, state: &SessionState) -> Value {
    match state.cid {
        Some(ref cid) => Value::Array(vec![
            Value::from(cid.as_str()),
            opt(&state.rid),
            opt(&state.rcid),
        ]),
        None => Value::Array(layout.new_conversation.iter().map(|s| Value::from(*s)).collect()),
    }
}

fn opt(field: &Option<String>) -> Value {
    field.as_deref().map(Value::from).unwrap_or(Value::Null)
}

fn constants(values: &[Constant]) -> impl Iterator<Item = Value> + '_ {
    values.iter().map(|c| c.to_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Undo both serialization layers.
    fn unwrap_envelope(encoded: &str) -> Vec<Value> {
        let outer: Value = serde_json::from_str(encoded).unwrap();
        let outer = outer.as_array().unwrap();
        assert_eq!(outer.len(), 2);
        assert!(outer[0].is_null());
        let inner: Value = serde_json::from_str(outer[1].as_str().unwrap()).unwrap();
        inner.as_array().unwrap().clone()
    }

    #[test]
    fn new_conversation_golden() {
        let encoded = encode("hello", &[], &SessionState::default(), "en");
        assert_eq!(
            encoded,
            r#"[null,"[[\"hello\",0,null,null,null,null,0],[\"en\"],[\"\",\"\",\"\"],null,1,null,null,null,null,null,null,0,null,1]"]"#
        );
    }

    #[test]
    fn continuation_with_attachments_golden() {
        let state = SessionState::new("c_1", "r_1", "rc_1");
        let attachments = vec![
            Attachment::new("/contrib_service/ttl_1d/abc", "notes.txt"),
            Attachment::new("/contrib_service/ttl_1d/def", "photo.png"),
        ];
        let encoded = encode("describe these", &attachments, &state, "en");
        assert_eq!(
            encoded,
            r#"[null,"[[\"describe these\",0,null,[[[\"/contrib_service/ttl_1d/abc\"],\"notes.txt\"],[[\"/contrib_service/ttl_1d/def\"],\"photo.png\"]]],[\"en\"],[\"c_1\",\"r_1\",\"rc_1\"],null,1,null,null,null,null,null,null,0,null,1]"]"#
        );
    }

    #[test]
    fn envelope_reconstructs_prompt_refs_and_triple() {
        let state = SessionState::new("c_9", "r_9", "rc_9");
        let attachments = vec![
            Attachment::new("ref-a", "a.pdf"),
            Attachment::new("ref-b", "b.pdf"),
            Attachment::new("ref-c", "c.pdf"),
        ];
        let envelope = unwrap_envelope(&encode("quote \"this\"\nplease", &attachments, &state, "de"));

        let turn = envelope[0].as_array().unwrap();
        assert_eq!(turn[0], "quote \"this\"\nplease");
        let refs: Vec<(&str, &str)> = turn[3]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| (f[0][0].as_str().unwrap(), f[1].as_str().unwrap()))
            .collect();
        assert_eq!(
            refs,
            vec![("ref-a", "a.pdf"), ("ref-b", "b.pdf"), ("ref-c", "c.pdf")]
        );
        assert_eq!(envelope[1], serde_json::json!(["de"]));
        assert_eq!(envelope[2], serde_json::json!(["c_9", "r_9", "rc_9"]));
    }

    #[test]
    fn missing_rid_and_rcid_encode_as_null() {
        let state = SessionState {
            cid: Some("c_1".into()),
            rid: None,
            rcid: None,
        };
        let envelope = unwrap_envelope(&encode("x", &[], &state, "en"));
        assert_eq!(envelope[2], serde_json::json!(["c_1", null, null]));
    }

    #[test]
    fn rid_without_cid_still_uses_placeholder() {
        let state = SessionState {
            cid: None,
            rid: Some("r_1".into()),
            rcid: Some("rc_1".into()),
        };
        let envelope = unwrap_envelope(&encode("x", &[], &state, "en"));
        assert_eq!(envelope[2], serde_json::json!(["", "", ""]));
    }

    #[test]
    fn tail_is_reproduced_after_triple() {
        let envelope = unwrap_envelope(&encode("x", &[], &SessionState::default(), "en"));
        let tail: Vec<Value> = CURRENT.envelope_tail.iter().map(|c| c.to_value()).collect();
        assert_eq!(&envelope[3..], tail.as_slice());
    }
}
