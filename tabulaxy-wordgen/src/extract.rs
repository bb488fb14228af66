//! Locating the JSON array in free-form oracle output
//!
//! Responses are supposed to be a bare JSON array but frequently arrive
//! wrapped in a markdown fence (```` ```json ... ``` ````) or with a line
//! of prose around them. Extraction strips a fence if present, then reads
//! exactly one JSON value starting at the first `[` or `{`. Text after that
//! value is ignored. The value must be an array: an object there is
//! rejected even if it contains an array further in.

use serde_json::Value;
use tabulaxy_common::{Error, Result};

const FENCE: &str = "```";

/// Body of the first fenced block, or the trimmed text if there is none
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let mut body = &trimmed[open + FENCE.len()..];

    // Language tag on the opening line ("json", "JSON", or nothing)
    if let Some(newline) = body.find('\n') {
        let tag = body[..newline].trim();
        if tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            body = &body[newline + 1..];
        }
    }

    match body.find(FENCE) {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Slice of `text` holding the candidate JSON array
///
/// Fails with `RequestFailed` when no JSON value starts in the body, when
/// that value is malformed or truncated, or when it is not an array.
pub fn extract_json_array(text: &str) -> Result<&str> {
    let body = strip_code_fences(text);

    let Some(start) = body.find(|c: char| c == '[' || c == '{') else {
        return Err(Error::RequestFailed(
            "No JSON array found in response".to_string(),
        ));
    };
    let json = &body[start..];

    let mut values = serde_json::Deserializer::from_str(json).into_iter::<Value>();
    match values.next() {
        Some(Ok(Value::Array(_))) => Ok(&json[..values.byte_offset()]),
        Some(Ok(_)) => Err(Error::RequestFailed(
            "Response JSON is not an array".to_string(),
        )),
        Some(Err(e)) => Err(Error::RequestFailed(format!("Invalid JSON array: {}", e))),
        None => Err(Error::RequestFailed(
            "No JSON array found in response".to_string(),
        )),
    }
}

/// Parse the response into raw candidate values
///
/// Element shape is not checked here; each element is validated on its
/// own during the merge so one bad object never discards the batch.
pub fn parse_candidates(text: &str) -> Result<Vec<Value>> {
    let array = extract_json_array(text)?;
    serde_json::from_str::<Vec<Value>>(array)
        .map_err(|e| Error::RequestFailed(format!("Invalid JSON array: {}", e)))
}
