/*!
 * Application configuration.
 *
 * Handles loading, validating and saving the JSON configuration file.
 */

use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::flashcards::{Difficulty, Section};
use crate::language_utils;

/// Allowed number of cards per generation
pub const MIN_CARD_COUNT: usize = 4;
pub const MAX_CARD_COUNT: usize = 30;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Model provider to use
    #[serde(default)]
    pub provider: ModelProvider,

    /// Available model providers
    #[serde(default = "default_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Sampling settings
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Defaults for the card form
    #[serde(default)]
    pub cards: CardDefaults,

    /// Export settings
    #[serde(default)]
    pub export: ExportSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Model provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    // @provider: Google Gemini
    #[default]
    Gemini,
    // @provider: Ollama
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl ModelProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }

    // @returns: Environment variable holding the API key, if the provider needs one
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Ollama => None,
        }
    }
}

// Implement Display trait for ModelProvider
impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ModelProvider
impl std::str::FromStr for ModelProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(ConfigError::InvalidValue(format!("Invalid provider type: {}", s))),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ModelProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Sampling settings shared by all providers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Temperature for base card generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound on the temperature used for translation calls
    #[serde(default = "default_translation_temperature_cap")]
    pub translation_temperature_cap: f32,

    /// Nucleus sampling mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Output token budget for base generation
    #[serde(default = "default_base_max_output_tokens")]
    pub base_max_output_tokens: u32,

    /// Output token budget for translation calls
    #[serde(default = "default_translation_max_output_tokens")]
    pub translation_max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            translation_temperature_cap: default_translation_temperature_cap(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            base_max_output_tokens: default_base_max_output_tokens(),
            translation_max_output_tokens: default_translation_max_output_tokens(),
        }
    }
}

/// Default values for the card form
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CardDefaults {
    /// Number of cards to generate
    #[serde(default = "default_card_count")]
    pub count: usize,

    /// Audience difficulty
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Output languages
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Section shown and exported
    #[serde(default)]
    pub section: Section,
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            count: default_card_count(),
            difficulty: Difficulty::default(),
            languages: default_languages(),
            section: Section::default(),
        }
    }
}

/// Export settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExportSettings {
    /// Directory the export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Write PDF files
    #[serde(default = "default_true")]
    pub pdf: bool,

    /// Write Anki CSV files
    #[serde(default = "default_true")]
    pub csv: bool,

    /// TrueType font for PDF text; the built-in Helvetica is used when unset
    #[serde(default)]
    pub pdf_font_path: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pdf: true,
            csv: true,
            pdf_font_path: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.6
}

fn default_translation_temperature_cap() -> f32 {
    0.3
}

fn default_top_p() -> f32 {
    0.9
}

fn default_top_k() -> u32 {
    40
}

fn default_base_max_output_tokens() -> u32 {
    2048
}

fn default_translation_max_output_tokens() -> u32 {
    4096
}

fn default_card_count() -> usize {
    10
}

fn default_languages() -> Vec<String> {
    vec!["English".to_string(), "French".to_string(), "Romanian".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

fn default_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(ModelProvider::Gemini),
        ProviderConfig::new(ModelProvider::Ollama),
        ProviderConfig::new(ModelProvider::Anthropic),
    ]
}

fn default_endpoint(provider: ModelProvider) -> String {
    match provider {
        ModelProvider::Gemini => "https://generativelanguage.googleapis.com".to_string(),
        ModelProvider::Ollama => "http://localhost:11434".to_string(),
        ModelProvider::Anthropic => "https://api.anthropic.com".to_string(),
    }
}

fn default_model(provider: ModelProvider) -> String {
    match provider {
        ModelProvider::Gemini => "gemini-1.5-flash".to_string(),
        ModelProvider::Ollama => "llama3.2".to_string(),
        ModelProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
    }
}

impl Config {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a configuration file, creating it with defaults when absent
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if FileManager::file_exists(path) {
            return Self::load(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.get_endpoint();
        Url::parse(&endpoint).map_err(|_| ConfigError::InvalidEndpoint(endpoint.clone()))?;

        // Validate API key for all providers except Ollama
        if let Some(env_var) = self.provider.api_key_env_var() {
            if self.get_api_key().is_empty() {
                return Err(ConfigError::MissingApiKey {
                    provider: self.provider.display_name().to_string(),
                    env_var: env_var.to_string(),
                });
            }
        }

        validate_unit_interval("temperature", self.generation.temperature)?;
        validate_unit_interval("translation_temperature_cap", self.generation.translation_temperature_cap)?;
        validate_unit_interval("top_p", self.generation.top_p)?;
        validate_card_count(self.cards.count)?;

        for language in &self.cards.languages {
            language_utils::normalize_language_name(language)?;
        }

        Ok(())
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &ModelProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter().find(|p| p.provider_type == provider_str)
    }

    fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        if let Some(index) = self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            return &mut self.available_providers[index];
        }
        self.available_providers.push(ProviderConfig::new(self.provider));
        let last = self.available_providers.len() - 1;
        &mut self.available_providers[last]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        self.get_active_provider_config()
            .filter(|p| !p.model.is_empty())
            .map(|p| p.model.clone())
            .unwrap_or_else(|| default_model(self.provider))
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        self.get_active_provider_config()
            .filter(|p| !p.endpoint.is_empty())
            .map(|p| p.endpoint.clone())
            .unwrap_or_else(|| default_endpoint(self.provider))
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Override the model of the active provider
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.active_provider_config_mut().model = model.into();
    }

    /// Resolve the API key of the active provider.
    ///
    /// Precedence: explicit value, then the provider's environment variable,
    /// then whatever the config file holds.
    pub fn resolve_api_key(&mut self, explicit: Option<String>) {
        let from_env = self
            .provider
            .api_key_env_var()
            .and_then(|var| std::env::var(var).ok());

        if let Some(key) = explicit.or(from_env).filter(|k| !k.trim().is_empty()) {
            self.active_provider_config_mut().api_key = key.trim().to_string();
        }
    }
}

/// Check that a sampling value lies in 0..=1
fn validate_unit_interval(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!("{} must be between 0 and 1, got {}", name, value)))
    }
}

/// Check that a card count is within the allowed range
pub fn validate_card_count(count: usize) -> Result<(), ConfigError> {
    if (MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(format!(
            "card count must be between {} and {}, got {}",
            MIN_CARD_COUNT, MAX_CARD_COUNT, count
        )))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ModelProvider::default(),
            available_providers: default_providers(),
            generation: GenerationSettings::default(),
            cards: CardDefaults::default(),
            export: ExportSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
