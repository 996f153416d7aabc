/*!
 * Model-backed card generation.
 *
 * - `repair`: turns loosely formatted model output into JSON
 * - `prompts`: prompt templates
 * - `service`: base generation and translation with per-language fallback
 * - `usage`: token accounting
 */

pub mod prompts;
pub mod repair;
pub mod service;
pub mod usage;

pub use self::repair::coerce_json;
pub use self::service::FlashcardService;
pub use self::usage::TokenUsageStats;
