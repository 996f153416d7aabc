/*!
 * Tests for repairing loosely formatted model output
 */

use serde_json::json;

use flashgen::errors::RAW_EXCERPT_CHARS;
use flashgen::generation::repair::{coerce_json, outermost_span, remove_trailing_commas, strip_code_fences};

#[test]
fn test_coerceJson_withFencedArrayInProse_shouldYieldArray() {
    let value = coerce_json("Sure! ```json [{\"term\":\"X\"}] ``` Hope this helps!").unwrap();
    assert_eq!(value, json!([{"term": "X"}]));
}

#[test]
fn test_coerceJson_withSmartQuotesAndTrailingComma_shouldParse() {
    let text = "Here you go:\n[{\u{201C}term\u{201D}: \u{201C}Index\u{201D}, \u{201C}qa\u{201D}: {\u{201C}question\u{201D}: \u{201C}Fast?\u{201D}, \u{201C}answer\u{201D}: \u{201C}Yes\u{201D},},},]";
    let value = coerce_json(text).unwrap();
    assert_eq!(value, json!([{"term": "Index", "qa": {"question": "Fast?", "answer": "Yes"}}]));
}

#[test]
fn test_coerceJson_withBatchObject_shouldKeepNestedArrays() {
    let text = "```json\n{\"English\": [{\"term\": \"A\"}], \"French\": [{\"term\": \"B\"}]}\n```";
    let value = coerce_json(text).unwrap();
    assert_eq!(value["French"][0]["term"], "B");
}

#[test]
fn test_coerceJson_withTruncatedOutput_shouldFailAndKeepRaw() {
    let raw = format!("[{{\"term\": \"{}", "x".repeat(RAW_EXCERPT_CHARS + 100));
    let err = coerce_json(&raw).unwrap_err();

    assert_eq!(err.raw, raw);
    assert_eq!(err.excerpt().chars().count(), RAW_EXCERPT_CHARS);
}

#[test]
fn test_outermostSpan_shouldFollowFirstOpener() {
    assert_eq!(outermost_span("x [{\"a\": 1}, {\"b\": 2}] y"), Some("[{\"a\": 1}, {\"b\": 2}]"));
    assert_eq!(outermost_span("x {\"a\": [1]} y"), Some("{\"a\": [1]}"));
    assert_eq!(outermost_span("[ only an opener {\"a\": 1}"), Some("{\"a\": 1}"));
    assert_eq!(outermost_span("nothing here"), None);
}

#[test]
fn test_helpers_shouldOnlyTouchTheirTarget() {
    assert_eq!(strip_code_fences("```json\n[]\n```"), "[]");
    assert_eq!(remove_trailing_commas("[1, 2 ,\n]"), "[1, 2 ]");
}
