//! Pulls a JSON value out of free-form model output.
//!
//! Models wrap JSON in prose or Markdown fences. [`extract_json_span`] finds
//! the first balanced top-level value that opens with the requested
//! delimiter; [`parse_ai_json`] then parses and validates it, keeping the
//! three ways this can fail apart.

use serde::de::DeserializeOwned;

use crate::models::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Object,
    Array,
}

impl Delimiter {
    fn open(self) -> char {
        match self {
            Delimiter::Object => '{',
            Delimiter::Array => '[',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("no '{0}' found in model output")]
    NoOpening(char),

    #[error("unbalanced JSON starting at byte {0}")]
    Unbalanced(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum AiParseError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("malformed JSON: {0}")]
    Malformed(serde_json::Error),

    #[error("unexpected JSON shape: {0}")]
    Schema(String),
}

/// Returns the first balanced `{..}` / `[..]` in `text`, starting at the
/// first opening delimiter. Brackets inside string literals are ignored.
pub fn extract_json_span(text: &str, delim: Delimiter) -> Result<&str, ExtractionError> {
    let open = delim.open();
    let start = text.find(open).ok_or(ExtractionError::NoOpening(open))?;

    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(ch) {
                    return Err(ExtractionError::Unbalanced(start));
                }
                if stack.is_empty() {
                    let end = start + offset + ch.len_utf8();
                    return Ok(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionError::Unbalanced(start))
}

/// Extract, parse and validate a `T` from model output.
pub fn parse_ai_json<T>(text: &str, delim: Delimiter) -> Result<T, AiParseError>
where
    T: DeserializeOwned + Validate,
{
    let span = extract_json_span(text, delim)?;

    let value: serde_json::Value = serde_json::from_str(span).map_err(AiParseError::Malformed)?;
    let parsed: T = serde_json::from_value(value).map_err(|e| AiParseError::Schema(e.to_string()))?;
    parsed.validate().map_err(AiParseError::Schema)?;

    Ok(parsed)
}
