/*!
 * Tests for card conversion, projection and session state
 */

use serde_json::json;

use flashgen::flashcards::{cards_from_json, project, Card, LanguageDecks, Section, Session};

use crate::common;

#[test]
fn test_cardsFromJson_withLooseModelOutput_shouldBeLenient() {
    let value = json!([
        {"term": "Join", "definition": null, "qa": "not an object"},
        42,
        {"term": 7, "example": true, "qa": {"question": "Q?"}}
    ]);
    let cards = cards_from_json(&value).unwrap();

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].definition, "");
    assert_eq!(cards[0].qa.question, "");
    assert_eq!(cards[1], Card::default());
    assert_eq!(cards[2].term, "7");
    assert_eq!(cards[2].example, "true");
    assert_eq!(cards[2].qa.answer, "");
}

#[test]
fn test_project_eachSection_shouldKeepOnlyItsFields() {
    let cards = common::sample_cards(3);

    for section in Section::ALL {
        let projected = project(&cards, section);
        assert_eq!(projected.len(), cards.len());

        for (original, card) in cards.iter().zip(&projected) {
            assert_eq!(card.term, original.term);
            assert_eq!(card.definition.is_empty(), section != Section::Definition);
            assert_eq!(card.example.is_empty(), section != Section::Example);
            assert_eq!(card.qa.question.is_empty(), section != Section::QA);
            assert_eq!(card.qa.answer.is_empty(), section != Section::QA);
        }
    }
}

#[test]
fn test_project_isIdempotent() {
    let cards = common::sample_cards(2);
    let once = project(&cards, Section::Example);
    assert_eq!(project(&once, Section::Example), once);
}

#[test]
fn test_session_replace_shouldDropPreviousCards() {
    let mut session = Session::new(Section::Definition);
    assert!(!session.has_cards());

    session.replace("Topic A", LanguageDecks::new(common::sample_cards(2)));
    session.replace("Topic B", LanguageDecks::new(common::sample_cards(4)));

    let current = session.current().unwrap();
    assert_eq!(current.topic, "Topic B");
    assert_eq!(current.decks.english().len(), 4);

    session.set_section(Section::QA);
    let projected = session.projected("English").unwrap();
    assert!(projected[0].definition.is_empty());
    assert!(!projected[0].qa.answer.is_empty());
    assert!(session.projected("French").is_none());
}
