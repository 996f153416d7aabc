/*!
 * Repair of loosely-structured model output into JSON.
 *
 * Models asked for "JSON only" still wrap their answer in markdown fences,
 * add a sentence before or after it, use typographic quotes or leave a
 * trailing comma. `coerce_json` undoes those artifacts in order and parses
 * the first candidate that works.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::ParseError;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*|\s*```").expect("code fence pattern is valid")
});

static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r",\s*([\]}])").expect("trailing comma pattern is valid")
});

/// Remove all markdown code fence markers
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

/// Replace curly quotes with their ASCII equivalents
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Remove commas directly preceding `}` or `]`
pub fn remove_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// Outermost `{...}` or `[...]` span of `text`.
///
/// The delimiter kind is chosen by whichever opener appears first; when that
/// kind has no closer after its opener the other kind is tried.
pub fn outermost_span(text: &str) -> Option<&str> {
    candidate_spans(text).into_iter().next()
}

/// Object and array spans of `text`, first opener first
fn candidate_spans(text: &str) -> Vec<&str> {
    let brace = delimited_span(text, '{', '}');
    let bracket = delimited_span(text, '[', ']');

    match (brace, bracket) {
        (Some((b_start, b)), Some((k_start, k))) if k_start < b_start => vec![k, b],
        (Some((_, b)), Some((_, k))) => vec![b, k],
        (Some((_, b)), None) => vec![b],
        (None, Some((_, k))) => vec![k],
        (None, None) => Vec::new(),
    }
}

/// First `open` to last `close`, with the opener's byte offset
fn delimited_span(text: &str, open: char, close: char) -> Option<(usize, &str)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| (start, &text[start..=end]))
}

/// Parse model output into a JSON value, repairing common artifacts.
///
/// Attempts, first success wins: strip fences and normalize quotes, parse
/// directly; otherwise cut the outermost span of the kind that opens first,
/// drop trailing commas and parse again, then the other kind's span. The
/// error carries the first failure and the untouched input.
pub fn coerce_json(text: &str) -> Result<Value, ParseError> {
    let normalized = normalize_quotes(&strip_code_fences(text));

    if let Ok(value) = serde_json::from_str::<Value>(&normalized) {
        return Ok(value);
    }

    let mut spans = candidate_spans(&normalized);
    if spans.is_empty() {
        spans.push(normalized.as_str());
    }

    let mut first_error = None;
    for span in spans {
        match serde_json::from_str::<Value>(&remove_trailing_commas(span)) {
            Ok(value) => return Ok(value),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    let message = first_error.map(|e| e.to_string()).unwrap_or_default();
    Err(ParseError::new(message, text))
}
