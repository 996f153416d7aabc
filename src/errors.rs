/*!
 * Error types for the flashgen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Maximum number of characters of raw model output surfaced in diagnostics
pub const RAW_EXCERPT_CHARS: usize = 5000;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Model output that could not be coerced into JSON
#[derive(Error, Debug, Clone)]
#[error("Could not parse model output as JSON: {message}")]
pub struct ParseError {
    /// Parser message for the last attempt
    pub message: String,
    /// The raw text as received from the model
    pub raw: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Bounded prefix of the raw text for display
    pub fn excerpt(&self) -> String {
        excerpt(&self.raw)
    }
}

/// Errors that can occur while generating or translating cards
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The model call itself failed
    #[error("Model call failed: {0}")]
    Provider(#[from] ProviderError),

    /// The response could not be repaired into JSON
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Valid JSON, but not the expected list/object
    #[error("Expected a JSON {expected} in the model output")]
    UnexpectedShape {
        /// Description of the expected value
        expected: &'static str,
        /// The raw text as received from the model
        raw: String,
    },
}

impl GenerationError {
    /// Bounded prefix of the raw model output, when one exists
    pub fn raw_excerpt(&self) -> Option<String> {
        match self {
            Self::Provider(_) => None,
            Self::Parse(e) => Some(e.excerpt()),
            Self::UnexpectedShape { raw, .. } => Some(excerpt(raw)),
        }
    }
}

/// Errors raised before any model call is attempted
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No credential for a provider that requires one
    #[error("No API key found for {provider}. Pass --api-key or set {env_var}.")]
    MissingApiKey {
        provider: String,
        env_var: String,
    },

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),

    /// A setting is outside its allowed range
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A language name or code that could not be resolved
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Reading or writing the config file failed
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for the schema
    #[error("Config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that can occur while writing export files
#[derive(Error, Debug)]
pub enum ExportError {
    /// PDF construction failed
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// CSV writing failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the file failed
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from card generation
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from an exporter
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

fn excerpt(raw: &str) -> String {
    raw.chars().take(RAW_EXCERPT_CHARS).collect()
}
