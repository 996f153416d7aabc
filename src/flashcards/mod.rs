/*!
 * Flashcard records and their in-memory collections.
 *
 * - `Card` and `QaPair`: a single flashcard
 * - `Section`: which part of a card is shown and exported
 * - `Difficulty`: audience level requested from the model
 * - `LanguageDecks`: ordered language -> cards mapping for one generation run
 * - `filter`: section projection
 * - `session`: the state held between shell actions
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::language_utils::ENGLISH;

pub mod filter;
pub mod session;

pub use self::filter::project;
pub use self::session::Session;

/// Question/answer pair of a card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// A single flashcard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub qa: QaPair,
}

impl Card {
    /// Build a card from loosely-typed model output.
    ///
    /// Missing or null fields become empty strings, other scalars keep their
    /// JSON text, and a `qa` that is not an object becomes an empty pair.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let qa = obj
            .get("qa")
            .and_then(Value::as_object)
            .map(|qa| QaPair {
                question: lenient_string(qa.get("question")),
                answer: lenient_string(qa.get("answer")),
            })
            .unwrap_or_default();

        Self {
            term: lenient_string(obj.get("term")),
            definition: lenient_string(obj.get("definition")),
            example: lenient_string(obj.get("example")),
            qa,
        }
    }

    /// Term to display, with a placeholder for blank terms
    pub fn display_term(&self) -> &str {
        if self.term.trim().is_empty() {
            "(no term)"
        } else {
            &self.term
        }
    }
}

fn lenient_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Convert a JSON array into cards, keeping positions.
///
/// Returns `None` when the value is not an array.
pub fn cards_from_json(value: &Value) -> Option<Vec<Card>> {
    value
        .as_array()
        .map(|items| items.iter().map(Card::from_json).collect())
}

/// Which part of a card is shown and exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Definition,
    Example,
    #[serde(rename = "q&a", alias = "qa")]
    QA,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Definition, Section::QA, Section::Example];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Definition => "Definition",
            Self::Example => "Example",
            Self::QA => "Q&A",
        }
    }

    /// Lowercase label used in export file names
    pub fn file_label(&self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Example => "example",
            Self::QA => "q&a",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Section {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "definition" | "def" => Ok(Self::Definition),
            "example" => Ok(Self::Example),
            "q&a" | "qa" | "q/a" => Ok(Self::QA),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown card section '{}' (expected definition, example or q&a)",
                other
            ))),
        }
    }
}

/// Audience level requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown difficulty '{}' (expected beginner, intermediate or advanced)",
                other
            ))),
        }
    }
}

/// Cards of one language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDeck {
    pub language: String,
    pub cards: Vec<Card>,
}

/// Ordered `language -> cards` mapping produced by one generation run.
///
/// English is always present and always first.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageDecks {
    decks: Vec<LanguageDeck>,
}

impl LanguageDecks {
    /// Start a mapping from the English source cards
    pub fn new(english: Vec<Card>) -> Self {
        Self {
            decks: vec![LanguageDeck {
                language: ENGLISH.to_string(),
                cards: english,
            }],
        }
    }

    /// Insert or replace the cards for a language.
    ///
    /// English cannot be replaced; it always mirrors the source cards.
    pub fn insert(&mut self, language: impl Into<String>, cards: Vec<Card>) {
        let language = language.into();
        if language.eq_ignore_ascii_case(ENGLISH) {
            return;
        }
        match self.decks.iter_mut().find(|d| d.language == language) {
            Some(deck) => deck.cards = cards,
            None => self.decks.push(LanguageDeck { language, cards }),
        }
    }

    pub fn get(&self, language: &str) -> Option<&[Card]> {
        self.decks
            .iter()
            .find(|d| d.language == language)
            .map(|d| d.cards.as_slice())
    }

    pub fn english(&self) -> &[Card] {
        &self.decks[0].cards
    }

    pub fn contains(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.decks.iter().map(|d| d.language.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageDeck> {
        self.decks.iter()
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}
