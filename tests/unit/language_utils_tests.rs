/*!
 * Tests for language name utilities
 */

use flashgen::language_utils::{canonical_language_name, is_english, normalize_language_list, normalize_language_name};

#[test]
fn test_canonicalLanguageName_withNamesAndCodes_shouldResolve() {
    assert_eq!(canonical_language_name("french").as_deref(), Some("French"));
    assert_eq!(canonical_language_name(" FRENCH ").as_deref(), Some("French"));
    assert_eq!(canonical_language_name("fr").as_deref(), Some("French"));
    assert_eq!(canonical_language_name("fre").as_deref(), Some("French"));
    assert_eq!(canonical_language_name("rum").as_deref(), Some("Romanian"));
    assert_eq!(canonical_language_name("ron").as_deref(), Some("Romanian"));
    assert_eq!(canonical_language_name("ur").as_deref(), Some("Urdu"));
    assert_eq!(canonical_language_name("Klingonish"), None);
    assert_eq!(canonical_language_name(""), None);
}

#[test]
fn test_normalizeLanguageName_withUnknown_shouldError() {
    assert_eq!(normalize_language_name("ro").unwrap(), "Romanian");
    assert!(normalize_language_name("zz").is_err());
}

#[test]
fn test_normalizeLanguageList_shouldPutEnglishFirstAndDedupe() {
    let languages = normalize_language_list(&["French", "", "fr", "  ", "Urdu", "english"]);
    assert_eq!(languages, vec!["English", "French", "Urdu"]);
}

#[test]
fn test_normalizeLanguageList_withUnknownName_shouldKeepItTrimmed() {
    let languages = normalize_language_list(&[" Elvish "]);
    assert_eq!(languages, vec!["English", "Elvish"]);
}

#[test]
fn test_isEnglish_shouldIgnoreCase() {
    assert!(is_english("English"));
    assert!(is_english(" english "));
    assert!(!is_english("French"));
}
