/*!
 * Tests for application configuration functionality
 */

use flashgen::app_config::{Config, LogLevel, ModelProvider, ProviderConfig};
use flashgen::errors::ConfigError;
use flashgen::flashcards::{Difficulty, Section};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider, ModelProvider::Gemini);
    assert_eq!(config.get_model(), "gemini-1.5-flash");
    assert_eq!(config.cards.count, 10);
    assert_eq!(config.cards.difficulty, Difficulty::Beginner);
    assert_eq!(config.cards.section, Section::Definition);
    assert_eq!(config.cards.languages, vec!["English", "French", "Romanian"]);
    assert_eq!(config.generation.temperature, 0.6);
    assert_eq!(config.generation.translation_temperature_cap, 0.3);
    assert_eq!(config.generation.base_max_output_tokens, 2048);
    assert_eq!(config.generation.translation_max_output_tokens, 4096);
    assert!(config.export.pdf && config.export.csv);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_validate_gemini_withoutApiKey_shouldFail() {
    let config = Config::default();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey { ref env_var, .. } if env_var == "GEMINI_API_KEY"));
}

#[test]
fn test_validate_ollama_withoutApiKey_shouldPass() {
    let temp = common::create_temp_dir().unwrap();
    let config = common::test_config(temp.path());
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let temp = common::create_temp_dir().unwrap();

    let mut config = common::test_config(temp.path());
    config.cards.count = 31;
    assert!(config.validate().is_err());

    let mut config = common::test_config(temp.path());
    config.generation.temperature = 1.2;
    assert!(config.validate().is_err());

    let mut config = common::test_config(temp.path());
    config.available_providers = vec![ProviderConfig {
        endpoint: "not a url".to_string(),
        ..ProviderConfig::new(ModelProvider::Ollama)
    }];
    assert!(matches!(config.validate(), Err(ConfigError::InvalidEndpoint(_))));

    let mut config = common::test_config(temp.path());
    config.cards.languages.push("Klingonish".to_string());
    assert!(matches!(config.validate(), Err(ConfigError::UnsupportedLanguage(_))));
}

#[test]
fn test_resolveApiKey_explicitValue_shouldWin() {
    let mut config = Config::default();
    config.provider = ModelProvider::Anthropic;
    config.resolve_api_key(Some("  sk-test  ".to_string()));

    assert_eq!(config.get_api_key(), "sk-test");
    assert!(config.validate().is_ok());
}

#[test]
fn test_setModel_shouldOnlyChangeActiveProvider() {
    let mut config = Config::default();
    config.provider = ModelProvider::Ollama;
    config.set_model("mistral");

    assert_eq!(config.get_model(), "mistral");
    let gemini = config.get_provider_config(&ModelProvider::Gemini).unwrap();
    assert_eq!(gemini.model, "gemini-1.5-flash");
}

#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let temp = common::create_temp_dir().unwrap();
    let path = temp.path().join("conf.json");

    let mut config = common::test_config(temp.path());
    config.cards.section = Section::QA;
    config.cards.difficulty = Difficulty::Advanced;
    config.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"q&a\""));

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.provider, ModelProvider::Ollama);
    assert_eq!(loaded.cards, config.cards);
    assert_eq!(loaded.export, config.export);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let temp = common::create_temp_dir().unwrap();
    let path = temp.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.cards.count, 10);
}

#[test]
fn test_load_withPartialFile_shouldFillDefaults() {
    let temp = common::create_temp_dir().unwrap();
    let path = temp.path().join("conf.json");
    std::fs::write(&path, r#"{"provider": "anthropic", "cards": {"count": 5}}"#).unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.provider, ModelProvider::Anthropic);
    assert_eq!(config.cards.count, 5);
    assert_eq!(config.cards.languages.len(), 3);
    assert_eq!(config.get_endpoint(), "https://api.anthropic.com");
}
