//! Structured response extraction: fence unwrapping plus strict JSON parsing.
//!
//! Model output is only ever handed to `serde_json`. Missing keys, wrong
//! types, malformed JSON and non-object values all fail the whole record;
//! nothing is defaulted. Extra keys are ignored.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::debug;

use crate::analysis::{PraiseEmpathyResult, ToneAnalysisResult};
use crate::error::ExtractionError;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strips a surrounding code fence, preferring a ```` ```json ```` block over a
/// plain ```` ``` ```` block. Text without a fence comes back trimmed.
pub fn unwrap_fence(text: &str) -> &str {
    let text = text.trim();

    if let Some(start) = text.find(JSON_FENCE) {
        let body = &text[start + JSON_FENCE.len()..];
        return until_fence(body).trim();
    }

    if let Some(start) = text.find(FENCE) {
        let body = &text[start + FENCE.len()..];
        return until_fence(body).trim();
    }

    text
}

fn until_fence(body: &str) -> &str {
    match body.find(FENCE) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// A record the extractor can produce.
pub trait Structured: DeserializeOwned {
    /// Top-level keys whose values must themselves be JSON objects.
    const NESTED_OBJECTS: &'static [&'static str] = &[];
}

impl Structured for ToneAnalysisResult {
    const NESTED_OBJECTS: &'static [&'static str] =
        &["emotional_tone", "empathy_possibility", "tone"];
}

impl Structured for PraiseEmpathyResult {}

/// Runs the full pipeline on raw completion text.
pub fn extract<T: Structured>(raw: &str) -> Result<T, ExtractionError> {
    let working = unwrap_fence(raw);
    parse_object::<T>(working).map_err(|source| {
        debug!(error = %source, "Structured extraction failed");
        ExtractionError {
            working_text: working.to_string(),
            source,
        }
    })
}

fn parse_object<T: Structured>(working: &str) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_str(working)?;
    let object = value
        .as_object()
        .ok_or_else(|| serde_json::Error::custom("expected a JSON object at the top level"))?;
    for key in T::NESTED_OBJECTS {
        match object.get(*key) {
            Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(serde_json::Error::custom(format!(
                    "field `{key}` must be a JSON object"
                )))
            }
            None => return Err(serde_json::Error::missing_field(*key)),
        }
    }
    serde_json::from_value(value)
}

pub fn extract_tone_analysis(raw: &str) -> Result<ToneAnalysisResult, ExtractionError> {
    extract(raw)
}

pub fn extract_praise_empathy(raw: &str) -> Result<PraiseEmpathyResult, ExtractionError> {
    extract(raw)
}
