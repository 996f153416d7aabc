/*!
 * Language utilities for target language handling.
 *
 * Cards are keyed by English language names ("French", "Urdu"). These
 * helpers resolve user input given either as a name or as an ISO 639-1 /
 * ISO 639-2 code to that canonical name.
 */

use isolang::Language;

use crate::errors::ConfigError;

/// Canonical name of the source language
pub const ENGLISH: &str = "English";

/// Languages offered by the interactive shell
pub const SUPPORTED_LANGUAGES: [&str; 4] = ["English", "French", "Romanian", "Urdu"];

/// Map ISO 639-2/B codes to their ISO 639-2/T equivalent
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"), // French
        "ger" => Some("deu"), // German
        "dut" => Some("nld"), // Dutch
        "gre" => Some("ell"), // Greek
        "chi" => Some("zho"), // Chinese
        "cze" => Some("ces"), // Czech
        "ice" => Some("isl"), // Icelandic
        "alb" => Some("sqi"), // Albanian
        "arm" => Some("hye"), // Armenian
        "baq" => Some("eus"), // Basque
        "bur" => Some("mya"), // Burmese
        "per" => Some("fas"), // Persian
        "geo" => Some("kat"), // Georgian
        "may" => Some("msa"), // Malay
        "mac" => Some("mkd"), // Macedonian
        "rum" => Some("ron"), // Romanian
        "slo" => Some("slk"), // Slovak
        "wel" => Some("cym"), // Welsh
        _ => None,
    }
}

/// Resolve an ISO 639-1 or ISO 639-2 code
fn language_from_code(code: &str) -> Option<Language> {
    match code.len() {
        2 => Language::from_639_1(code),
        3 => {
            let part2t = part2b_to_part2t(code).unwrap_or(code);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Capitalize each word: "old english" -> "Old English"
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Resolve a language name or code to its canonical English name
pub fn canonical_language_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Short inputs are codes first: "ron" is Romanian, not the Ron language
    let lower = trimmed.to_lowercase();
    let looks_like_code = lower.len() <= 3 && lower.chars().all(|c| c.is_ascii_alphabetic());
    if looks_like_code {
        if let Some(lang) = language_from_code(&lower) {
            return Some(lang.to_name().to_string());
        }
    }

    Language::from_name(&title_case(trimmed)).map(|lang| lang.to_name().to_string())
}

/// Strict variant of [`canonical_language_name`] for user input
pub fn normalize_language_name(input: &str) -> Result<String, ConfigError> {
    canonical_language_name(input)
        .ok_or_else(|| ConfigError::UnsupportedLanguage(input.trim().to_string()))
}

/// Normalize a requested language list.
///
/// Entries are trimmed, blanks dropped, known names canonicalized, duplicates
/// removed case-insensitively, and English is placed first.
pub fn normalize_language_list<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let mut result = vec![ENGLISH.to_string()];

    for lang in languages {
        let trimmed = lang.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let name = canonical_language_name(trimmed).unwrap_or_else(|| trimmed.to_string());
        if !result.iter().any(|existing| existing.eq_ignore_ascii_case(&name)) {
            result.push(name);
        }
    }

    result
}

/// Check whether a language name refers to English
pub fn is_english(language: &str) -> bool {
    language.trim().eq_ignore_ascii_case(ENGLISH)
}
