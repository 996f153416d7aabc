use super::{Card, QaPair, Section};

/// Blank every field outside `section`.
///
/// The result has the same length and order as `cards`; terms are kept.
pub fn project(cards: &[Card], section: Section) -> Vec<Card> {
    cards
        .iter()
        .map(|card| {
            let mut projected = Card {
                term: card.term.clone(),
                ..Default::default()
            };
            match section {
                Section::Definition => projected.definition = card.definition.clone(),
                Section::Example => projected.example = card.example.clone(),
                Section::QA => projected.qa = card.qa.clone(),
            }
            projected
        })
        .collect()
}

/// Lines shown for a single card in the given section
pub fn section_lines(card: &Card, section: Section) -> Vec<(&'static str, &str)> {
    match section {
        Section::Definition => vec![("Definition", card.definition.as_str())],
        Section::Example => vec![("Example", card.example.as_str())],
        Section::QA => {
            let QaPair { question, answer } = &card.qa;
            vec![("Q", question.as_str()), ("A", answer.as_str())]
        }
    }
}
