/*!
 * Anki-compatible CSV export.
 *
 * Columns are `Front,Back,Tags`: the term, the selected section and the
 * language. The bytes start with a UTF-8 BOM so spreadsheet tools detect the
 * encoding of non-Latin text.
 */

use csv::{Terminator, WriterBuilder};

use crate::errors::ExportError;
use crate::flashcards::{Card, Section};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Back side of a card for the selected section
pub fn back_text(card: &Card, section: Section) -> String {
    match section {
        Section::Definition => card.definition.clone(),
        Section::Example => format!("Example: {}", card.example),
        Section::QA => format!("Q: {}\nA: {}", card.qa.question, card.qa.answer),
    }
}

/// Build the CSV bytes for one language
pub fn build_csv(language: &str, cards: &[Card], section: Section) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(["Front", "Back", "Tags"])?;
    for card in cards {
        writer.write_record([card.term.as_str(), back_text(card, section).as_str(), language])?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
