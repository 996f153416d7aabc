/*!
 * Common test utilities for the flashgen test suite
 */

use anyhow::Result;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

use flashgen::app_config::{Config, GenerationSettings, ModelProvider};
use flashgen::app_controller::Controller;
use flashgen::flashcards::{Card, QaPair};
use flashgen::generation::FlashcardService;
use flashgen::providers::mock::MockProvider;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// A fully populated card
pub fn sample_card(n: usize) -> Card {
    Card {
        term: format!("Term {}", n),
        definition: format!("Definition of term {}.", n),
        example: format!("Example for term {}.", n),
        qa: QaPair {
            question: format!("What is term {}?", n),
            answer: format!("Answer {}.", n),
        },
    }
}

pub fn sample_cards(count: usize) -> Vec<Card> {
    (1..=count).map(sample_card).collect()
}

/// Model reply containing `count` cards as a JSON array
pub fn cards_reply(count: usize, prefix: &str) -> String {
    let cards: Vec<_> = (1..=count)
        .map(|n| {
            json!({
                "term": format!("{}{}", prefix, n),
                "definition": format!("{}definition {}", prefix, n),
                "example": format!("{}example {}", prefix, n),
                "qa": {"question": format!("{}question {}", prefix, n), "answer": format!("{}answer {}", prefix, n)}
            })
        })
        .collect();
    serde_json::Value::Array(cards).to_string()
}

/// Config that needs no API key and writes into `output_dir`
pub fn test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.provider = ModelProvider::Ollama;
    config.export.output_dir = output_dir.to_path_buf();
    config
}

/// Service backed by a clone of `mock`
pub fn mock_service(mock: &MockProvider) -> FlashcardService {
    FlashcardService::with_provider(Box::new(mock.clone()), GenerationSettings::default())
}

/// Controller backed by a clone of `mock`
pub fn mock_controller(mock: &MockProvider, output_dir: &Path) -> Controller {
    Controller::with_service(test_config(output_dir), mock_service(mock))
}

/// Route library logs to the test output
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
