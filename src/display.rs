/*!
 * Plain-text rendering of generated cards for the terminal.
 */

use std::fmt::Write;

use crate::flashcards::filter::section_lines;
use crate::flashcards::{project, Card, LanguageDecks, Section};

/// Render one language: a `{language} - {n} cards` header, then each card
/// with only the lines of `section`.
pub fn render_language(language: &str, cards: &[Card], section: Section) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - {} cards", language, cards.len());
    let _ = writeln!(out, "{}", "=".repeat(40));

    for (index, card) in project(cards, section).iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, card.display_term());
        for (label, text) in section_lines(card, section) {
            let _ = writeln!(out, "   {}: {}", label, text);
        }
    }
    out
}

/// Render every language of a generation run
pub fn render_decks(decks: &LanguageDecks, section: Section) -> String {
    let mut out = format!("Flashcards ready - Content: {}\n\n", section);
    for deck in decks.iter() {
        out.push_str(&render_language(&deck.language, &deck.cards, section));
        out.push('\n');
    }
    out
}
