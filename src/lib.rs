/*!
 * # flashgen - Multilingual Flashcard Generator
 *
 * A Rust library and CLI that asks a large-language-model service for study
 * flashcards and exports them per language.
 *
 * ## Features
 *
 * - Generate flashcards (term, definition, example, Q&A) for any topic
 * - Translate them into several languages with a single batched request,
 *   falling back to one request per language
 * - Repair loosely formatted JSON returned by models
 * - Show only one section of each card (Definition, Example or Q&A)
 * - Export printable PDF tables and Anki-importable CSV files
 * - Providers:
 *   - Google Gemini API
 *   - Ollama (local LLM)
 *   - Anthropic API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `flashcards`: Card records, section projection and session state
 * - `generation`: Prompting, response repair and translation fallback
 * - `export`: PDF and CSV exporters
 * - `display`: Terminal rendering
 * - `app_controller`: Generation run flow
 * - `shell`: Interactive prompt loop
 * - `language_utils`: Language name and ISO code utilities
 * - `providers`: Client implementations for LLM providers
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod display;
pub mod errors;
pub mod export;
pub mod file_utils;
pub mod flashcards;
pub mod generation;
pub mod language_utils;
pub mod providers;
pub mod shell;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, GenerationRequest};
pub use errors::{AppError, ConfigError, ExportError, GenerationError, ParseError, ProviderError};
pub use flashcards::{Card, Difficulty, LanguageDecks, QaPair, Section, Session};
pub use generation::{coerce_json, FlashcardService};
