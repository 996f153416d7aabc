/*!
 * Per-shell session state.
 *
 * A session holds the result of the last successful generation. It is
 * created empty, replaced on each successful generation and dropped when the
 * shell exits.
 */

use chrono::{DateTime, Utc};

use super::{project, Card, LanguageDecks, Section};

/// Result of one successful generation run
#[derive(Debug, Clone)]
pub struct GeneratedSet {
    pub topic: String,
    pub decks: LanguageDecks,
    pub generated_at: DateTime<Utc>,
}

/// State shared between actions of one interactive session
#[derive(Debug, Clone, Default)]
pub struct Session {
    section: Section,
    current: Option<GeneratedSet>,
}

impl Session {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            current: None,
        }
    }

    /// Replace the current cards with a fresh generation
    pub fn replace(&mut self, topic: impl Into<String>, decks: LanguageDecks) {
        self.current = Some(GeneratedSet {
            topic: topic.into(),
            decks,
            generated_at: Utc::now(),
        });
    }

    /// Forget the current cards
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&GeneratedSet> {
        self.current.as_ref()
    }

    pub fn has_cards(&self) -> bool {
        self.current.is_some()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
    }

    /// Cards of `language` projected onto the current section
    pub fn projected(&self, language: &str) -> Option<Vec<Card>> {
        self.current
            .as_ref()
            .and_then(|set| set.decks.get(language))
            .map(|cards| project(cards, self.section))
    }
}
