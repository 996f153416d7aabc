/*!
 * Flashcard generation service.
 *
 * `FlashcardService` owns a provider and the sampling settings and exposes
 * the two model-backed operations of a run:
 * - `generate_base`: English cards for a topic
 * - `translate`: the same cards in every requested language, with a batched
 *   call first and one call per language when the batch reply is unusable
 */

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde_json::Value;
use std::time::Instant;

use crate::app_config::{Config, GenerationSettings, ModelProvider};
use crate::errors::{ConfigError, GenerationError, ProviderError};
use crate::flashcards::{cards_from_json, Card, Difficulty, LanguageDecks};
use crate::language_utils::{is_english, normalize_language_list};
use crate::providers::anthropic::Anthropic;
use crate::providers::gemini::Gemini;
use crate::providers::ollama::Ollama;
use crate::providers::{ModelRequest, Provider, ResponseFormat, SamplingConfig};

use super::prompts;
use super::repair::coerce_json;
use super::usage::TokenUsageStats;

/// Generates and translates flashcards through a model provider
#[derive(Debug)]
pub struct FlashcardService {
    /// Backend used for every call
    provider: Box<dyn Provider>,

    /// Sampling settings
    settings: GenerationSettings,

    /// Accumulated usage over the lifetime of the service
    usage: Mutex<TokenUsageStats>,
}

impl FlashcardService {
    /// Create a service with an explicit provider
    pub fn with_provider(provider: Box<dyn Provider>, settings: GenerationSettings) -> Self {
        let usage = Mutex::new(TokenUsageStats::new(provider.name()));
        Self {
            provider,
            settings,
            usage,
        }
    }

    /// Create a service for the active provider of a configuration.
    ///
    /// Fails before any request is made when a required API key is missing.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let model = config.get_model();
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();
        let api_key = config.get_api_key();

        if let Some(env_var) = config.provider.api_key_env_var() {
            if api_key.is_empty() {
                return Err(ConfigError::MissingApiKey {
                    provider: config.provider.display_name().to_string(),
                    env_var: env_var.to_string(),
                });
            }
        }

        let provider: Box<dyn Provider> = match config.provider {
            ModelProvider::Gemini => Box::new(Gemini::new(api_key, endpoint, model, timeout_secs)),
            ModelProvider::Ollama => Box::new(Ollama::new(endpoint, model, timeout_secs)),
            ModelProvider::Anthropic => Box::new(Anthropic::new(api_key, endpoint, model, timeout_secs)),
        };

        Ok(Self::with_provider(provider, config.generation.clone()))
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Snapshot of the usage statistics
    pub fn usage(&self) -> TokenUsageStats {
        self.usage.lock().clone()
    }

    /// Check that the provider is reachable
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        self.provider.test_connection().await
    }

    /// Generate English cards for a topic.
    ///
    /// The reply must repair into a JSON array, or an object with a single
    /// key holding one (JSON modes such as Ollama's favour objects). Anything
    /// else is an error carrying the raw model text.
    pub async fn generate_base(
        &self,
        topic: &str,
        count: usize,
        difficulty: Difficulty,
        temperature: f32,
    ) -> Result<Vec<Card>, GenerationError> {
        let prompt = prompts::base_cards_prompt(topic, count, difficulty);
        let sampling = self.sampling(temperature, self.settings.base_max_output_tokens);

        info!("Generating {} {} cards for '{}'", count, difficulty, topic);
        let text = self.call(prompt, sampling).await?;

        let value = coerce_json(&text)?;
        let cards = cards_from_json(unwrap_single_key(&value)).ok_or(GenerationError::UnexpectedShape {
            expected: "list",
            raw: text,
        })?;

        if cards.len() != count {
            warn!("Requested {} cards, model returned {}", count, cards.len());
        }
        Ok(cards)
    }

    /// Translate cards into the target languages.
    ///
    /// English always maps to `cards` unchanged. Never fails: a language
    /// whose translation cannot be obtained maps to an empty list.
    pub async fn translate<S: AsRef<str>>(
        &self,
        cards: &[Card],
        target_languages: &[S],
        temperature: f32,
    ) -> LanguageDecks {
        let languages = normalize_language_list(target_languages);
        let mut decks = LanguageDecks::new(cards.to_vec());

        let targets: Vec<&String> = languages.iter().filter(|l| !is_english(l)).collect();
        if targets.is_empty() {
            return decks;
        }

        let cards_json = match serde_json::to_string(cards) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize cards for translation: {}", e);
                for language in targets {
                    decks.insert(language.as_str(), Vec::new());
                }
                return decks;
            }
        };

        let sampling = self.sampling(
            temperature.min(self.settings.translation_temperature_cap),
            self.settings.translation_max_output_tokens,
        );

        // Batched attempt
        let prompt = prompts::batch_translation_prompt(&languages, &cards_json);
        info!("Translating {} cards into {}", cards.len(), languages.join(", "));
        match self.call(prompt, sampling.clone()).await {
            Ok(text) => {
                if let Some(batch) = accept_batch(&text, &languages) {
                    for (language, translated) in batch {
                        decks.insert(language, translated);
                    }
                    return decks;
                }
                warn!("Batch translation reply unusable, translating one language at a time");
            }
            Err(e) => warn!("Batch translation failed ({}), translating one language at a time", e),
        }

        // Per-language fallback
        for language in targets {
            let prompt = prompts::single_translation_prompt(language, &cards_json);
            let translated = match self.call(prompt, sampling.clone()).await {
                Ok(text) => match coerce_json(&text) {
                    Ok(value) => cards_from_json(&value).unwrap_or_else(|| {
                        warn!("{} translation is not a list of cards", language);
                        Vec::new()
                    }),
                    Err(e) => {
                        warn!("{} translation could not be parsed: {}", language, e);
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!("{} translation failed: {}", language, e);
                    Vec::new()
                }
            };
            decks.insert(language.as_str(), translated);
        }

        decks
    }

    fn sampling(&self, temperature: f32, max_output_tokens: u32) -> SamplingConfig {
        SamplingConfig {
            temperature,
            top_p: self.settings.top_p,
            top_k: self.settings.top_k,
            response_format: ResponseFormat::Json,
            max_output_tokens,
        }
    }

    /// Send one prompt and record usage
    async fn call(&self, prompt: String, sampling: SamplingConfig) -> Result<String, ProviderError> {
        let request = ModelRequest::new(prompt, sampling);
        let start = Instant::now();
        let result = self.provider.complete(&request).await;
        let elapsed = start.elapsed();

        let response = result?;
        self.usage
            .lock()
            .record(response.prompt_tokens, response.completion_tokens, elapsed);
        debug!(
            "{} replied with {} chars in {:.2}s",
            self.provider.name(),
            response.text.len(),
            elapsed.as_secs_f64()
        );
        Ok(response.text)
    }
}

/// Accept a batched translation reply.
///
/// The reply must be an object holding every requested language key. Only
/// the requested non-English languages are returned, in request order; a
/// value that is not an array becomes an empty list.
fn accept_batch(text: &str, languages: &[String]) -> Option<Vec<(String, Vec<Card>)>> {
    let value = match coerce_json(text) {
        Ok(value) => value,
        Err(e) => {
            debug!("Batch translation parse failed: {}", e);
            return None;
        }
    };
    let object = value.as_object()?;

    if let Some(missing) = languages.iter().find(|l| !object.contains_key(l.as_str())) {
        debug!("Batch translation is missing '{}'", missing);
        return None;
    }

    let accepted = languages
        .iter()
        .filter(|l| !is_english(l))
        .map(|language| {
            let cards = object.get(language.as_str()).and_then(cards_from_json).unwrap_or_else(|| {
                warn!("{} entry of batch translation is not a list of cards", language);
                Vec::new()
            });
            (language.clone(), cards)
        })
        .collect();

    Some(accepted)
}

/// The inner value of `{"key": [...]}`, otherwise `value` itself
fn unwrap_single_key(value: &Value) -> &Value {
    match value.as_object() {
        Some(map) if map.len() == 1 => match map.values().next() {
            Some(inner) if inner.is_array() => inner,
            _ => value,
        },
        _ => value,
    }
}
