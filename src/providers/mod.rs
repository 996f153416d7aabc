/*!
 * Provider implementations for text generation services.
 *
 * This module contains client implementations for various LLM providers:
 * - Gemini: Google Generative Language API
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic Messages API
 * - Mock: scripted responses for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Output format hint passed to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    /// Free-form text
    #[default]
    Text,
    /// JSON-only output
    Json,
}

/// Sampling configuration for a single model call
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    /// Temperature (0.0 to 1.0)
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Number of candidate tokens considered
    pub top_k: u32,
    /// Output format hint
    pub response_format: ResponseFormat,
    /// Maximum number of tokens to generate
    pub max_output_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.6,
            top_p: 0.9,
            top_k: 40,
            response_format: ResponseFormat::Json,
            max_output_tokens: 2048,
        }
    }
}

/// A prompt plus its sampling configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub prompt: String,
    pub sampling: SamplingConfig,
}

impl ModelRequest {
    pub fn new(prompt: impl Into<String>, sampling: SamplingConfig) -> Self {
        Self {
            prompt: prompt.into(),
            sampling,
        }
    }
}

/// Text returned by a provider, with token counts when reported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    pub text: String,
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
}

impl ModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            prompt_tokens: None,
            completion_tokens: None,
        }
    }

    /// The generated text
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Common trait for all LLM providers
///
/// This trait defines the single capability the flashcard service needs,
/// "generate text from a prompt with a sampling configuration", so any
/// backend can be substituted.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Display name used in logs
    fn name(&self) -> &str;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The prompt and sampling configuration
    ///
    /// # Returns
    /// * `Result<ModelResponse, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Build the shared HTTP client with a request timeout
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

/// Turn a non-success HTTP response into a provider error
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", provider, status, error_text);
    ProviderError::from_status(status.as_u16(), error_text)
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
