//! Decodes the generate endpoint's response body into a `ModelOutput`.
//!
//! The body is newline-framed; one line holds a JSON array of chunks. Some
//! chunks carry, as a JSON-encoded string, a "body" array with the reply.
//! Decoding runs in two passes: first locate the primary body (the first one
//! with a non-empty candidate list) and build every candidate from it, then
//! scan that chunk and the ones after it for generated images, which the
//! server often delivers in a later chunk than the text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::layout::{array_at, str_at, value_at, WireLayout, CURRENT};
use crate::credentials::Credentials;
use crate::models::{Candidate, GeneratedImage, Image, ModelOutput};
use crate::GeminiError;

static CARD_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^http://googleusercontent\.com/card_content/\d+")
        .expect("static regex must compile")
});

static GENERATED_PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://googleusercontent\.com/image_generation_content/\d+")
        .expect("static regex must compile")
});

/// Decode with the current wire layout. `cookies` is attached to every
/// generated image so it can be fetched later.
pub fn decode(raw: &str, cookies: &Credentials) -> Result<ModelOutput, GeminiError> {
    decode_with(&CURRENT, raw, cookies)
}

pub fn decode_with(
    layout: &WireLayout,
    raw: &str,
    cookies: &Credentials,
) -> Result<ModelOutput, GeminiError> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() <= layout.payload_line {
        return Err(GeminiError::MalformedResponse(format!(
            "expected at least {} lines, got {}",
            layout.payload_line + 1,
            lines.len()
        )));
    }

    let payload: Value = serde_json::from_str(lines[layout.payload_line].trim())
        .map_err(|e| GeminiError::MalformedResponse(format!("payload is not JSON: {e}")))?;
    let chunks = payload
        .as_array()
        .ok_or_else(|| GeminiError::MalformedResponse("payload is not an array".into()))?;

    let bodies: Vec<Option<Value>> = chunks.iter().map(|c| chunk_body(layout, c)).collect();

    let Some(body_index) = bodies.iter().position(|b| {
        b.as_ref()
            .and_then(|b| array_at(b, layout.body_candidates))
            .is_some_and(|c| !c.is_empty())
    }) else {
        // A body that answered with an empty candidate list is still a reply.
        let has_empty_body = bodies
            .iter()
            .flatten()
            .any(|b| array_at(b, layout.body_candidates).is_some());
        return Err(if has_empty_body {
            GeminiError::EmptyResponse
        } else {
            GeminiError::MalformedResponse("could not find the main content body".into())
        });
    };
    let body = bodies[body_index]
        .as_ref()
        .ok_or_else(|| GeminiError::MalformedResponse("main content body vanished".into()))?;

    debug!(chunks = chunks.len(), body_index, "located response body");

    let slots = array_at(body, layout.body_candidates).map(Vec::as_slice).unwrap_or(&[]);
    let mut candidates = Vec::with_capacity(slots.len());
    for (slot, data) in slots.iter().enumerate() {
        let Some(mut candidate) = parse_candidate(layout, data) else {
            warn!(slot, "skipping candidate without an id");
            continue;
        };
        candidate.generated_images = find_generated_images(layout, &bodies[body_index..], slot, cookies);
        if !candidate.generated_images.is_empty() {
            candidate.text = GENERATED_PLACEHOLDER_RE
                .replace_all(&candidate.text, "")
                .trim_end()
                .to_string();
        }
        candidates.push(candidate);
    }

    if candidates.is_empty() {
        return Err(GeminiError::EmptyResponse);
    }

    let metadata = array_at(body, layout.body_metadata)
        .map(|items| {
            items
                .iter()
                .map_while(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(ModelOutput::new(metadata, candidates))
}

/// The body array carried by a chunk, if any.
fn chunk_body(layout: &WireLayout, chunk: &Value) -> Option<Value> {
    let encoded = str_at(chunk, layout.chunk_body)?;
    let body: Value = serde_json::from_str(encoded).ok()?;
    body.is_array().then_some(body)
}

/// Build a candidate from its slot. Only the id is required; every other
/// field falls back to empty when missing or malformed.
fn parse_candidate(layout: &WireLayout, data: &Value) -> Option<Candidate> {
    let rcid = str_at(data, layout.candidate_rcid)?.to_string();

    let mut text = str_at(data, layout.candidate_text).unwrap_or_default().to_string();
    if CARD_CONTENT_RE.is_match(&text) {
        if let Some(card) = str_at(data, layout.candidate_card_text) {
            text = card.to_string();
        }
    }

    let reasoning = str_at(data, layout.candidate_reasoning).map(String::from);

    let web_images = array_at(data, layout.candidate_web_images)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| parse_web_image(layout, entry))
                .collect()
        })
        .unwrap_or_default();

    Some(Candidate {
        rcid,
        text,
        reasoning,
        web_images,
        generated_images: Vec::new(),
    })
}

fn parse_web_image(layout: &WireLayout, entry: &Value) -> Option<Image> {
    let image = Image {
        url: str_at(entry, layout.web_image_url)?.to_string(),
        title: str_at(entry, layout.web_image_title)?.to_string(),
        alt: str_at(entry, layout.web_image_alt)?.to_string(),
    };
    Some(image)
}

/// First body (in order) whose candidate `slot` has a non-empty
/// generated-image list.
fn find_generated_images(
    layout: &WireLayout,
    bodies: &[Option<Value>],
    slot: usize,
    cookies: &Credentials,
) -> Vec<GeneratedImage> {
    let found = bodies.iter().flatten().find_map(|body| {
        let candidate = array_at(body, layout.body_candidates)?.get(slot)?;
        let images = array_at(candidate, layout.candidate_generated_images)?;
        (!images.is_empty()).then_some(images)
    });

    let Some(entries) = found else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| parse_generated_image(layout, entry, index, cookies))
        .collect()
}

fn parse_generated_image(
    layout: &WireLayout,
    entry: &Value,
    index: usize,
    cookies: &Credentials,
) -> Option<GeneratedImage> {
    let url = str_at(entry, layout.generated_image_url)?.to_string();
    let title = match value_at(entry, layout.generated_image_label) {
        Some(Value::String(label)) => format!("[Generated Image {label}]"),
        Some(Value::Number(label)) => format!("[Generated Image {label}]"),
        _ => "[Generated Image]".to_string(),
    };
    let alt = array_at(entry, layout.generated_image_alts)
        .and_then(|alts| {
            alts.get(index)
                .and_then(Value::as_str)
                .or_else(|| alts.first().and_then(Value::as_str))
        })
        .unwrap_or_default()
        .to_string();

    Some(GeneratedImage {
        image: Image { url, title, alt },
        cookies: cookies.clone(),
    })
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
