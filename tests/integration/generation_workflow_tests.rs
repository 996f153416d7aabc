/*!
 * Generation and translation through the flashcard service
 */

use flashgen::errors::{GenerationError, ProviderError};
use flashgen::flashcards::Difficulty;
use flashgen::providers::mock::MockProvider;

use crate::common;

#[tokio::test]
async fn test_generateBase_shouldReturnRequestedCards() {
    let mock = MockProvider::scripted([common::cards_reply(5, "Term ")]);
    let service = common::mock_service(&mock);

    let cards = service
        .generate_base("Basic SQL Joins", 5, Difficulty::Intermediate, 0.6)
        .await
        .unwrap();

    assert_eq!(cards.len(), 5);
    assert_eq!(cards[4].term, "Term 5");
    assert!(mock.requests()[0].prompt.contains("Audience difficulty: Intermediate."));
    assert_eq!(service.usage().requests, 1);
}

#[tokio::test]
async fn test_generateBase_withProseReply_shouldCarryRawExcerpt() {
    let mock = MockProvider::scripted(["I am unable to produce flashcards for this topic."]);
    let err = common::mock_service(&mock)
        .generate_base("???", 4, Difficulty::Beginner, 0.6)
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Parse(_)));
    assert_eq!(
        err.raw_excerpt().as_deref(),
        Some("I am unable to produce flashcards for this topic.")
    );
}

#[tokio::test]
async fn test_translate_batchMissingFrench_shouldMakeOneFallbackCall() {
    let mock = MockProvider::scripted([
        r#"{"English": []}"#.to_string(),
        common::cards_reply(2, "Terme "),
    ]);
    let english = common::sample_cards(2);

    let decks = common::mock_service(&mock).translate(&english, &["English", "French"], 0.6).await;

    assert_eq!(mock.request_count(), 2);
    assert!(mock.requests()[1].prompt.contains("into French."));
    assert_eq!(decks.english(), english.as_slice());
    assert_eq!(decks.get("French").unwrap()[1].term, "Terme 2");
    assert_eq!(decks.languages().collect::<Vec<_>>(), vec!["English", "French"]);
}

#[tokio::test]
async fn test_translate_fallbackFailure_shouldOnlyEmptyThatLanguage() {
    let mock = MockProvider::new();
    mock.push_error(ProviderError::ConnectionError("reset".to_string()));
    mock.push_response(common::cards_reply(2, "Fr "));
    mock.push_error(ProviderError::RateLimitExceeded("slow down".to_string()));
    mock.push_response(common::cards_reply(2, "Ur "));

    let decks = common::mock_service(&mock)
        .translate(&common::sample_cards(2), &["French", "Romanian", "Urdu"], 0.6)
        .await;

    assert_eq!(mock.request_count(), 4);
    assert_eq!(decks.get("French").unwrap().len(), 2);
    assert_eq!(decks.get("Romanian").unwrap().len(), 0);
    assert_eq!(decks.get("Urdu").unwrap()[0].term, "Ur 1");
    assert_eq!(decks.english().len(), 2);
}

#[tokio::test]
async fn test_translate_fallbackWithObjectReply_shouldGiveEmptyDeck() {
    let mock = MockProvider::scripted(["not json", r#"{"cards": []}"#]);

    let decks = common::mock_service(&mock)
        .translate(&common::sample_cards(1), &["fr"], 0.1)
        .await;

    assert_eq!(decks.get("French"), Some(&[][..]));
    assert!(mock.requests().iter().all(|r| r.sampling.temperature == 0.1));
}

#[tokio::test]
async fn test_translate_batchPrompt_shouldEmbedCardsAsJson() {
    let mock = MockProvider::scripted([r#"{"English": [], "French": []}"#]);
    let english = common::sample_cards(1);

    common::mock_service(&mock).translate(&english, &["French"], 0.6).await;

    let prompt = &mock.requests()[0].prompt;
    assert!(prompt.contains("Target languages: English, French"));
    assert!(prompt.contains(&serde_json::to_string(&english).unwrap()));
}
