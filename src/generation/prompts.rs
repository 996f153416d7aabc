/*!
 * Prompt templates for card generation and translation.
 *
 * All prompts ask for JSON only; the replies still go through the repair
 * step because models do not reliably comply.
 */

use crate::flashcards::Difficulty;

/// Prompt for the base English cards
pub fn base_cards_prompt(topic: &str, count: usize, difficulty: Difficulty) -> String {
    format!(
        r#"You are an expert teacher. Create {count} concise flashcards for the topic "{topic}".
Audience difficulty: {difficulty}.
Return ONLY valid JSON as a list of objects. Do not include any commentary.
Each card must have these fields:
- "term": a short key phrase or question (<= 8 words)
- "definition": 2-3 precise sentences
- "example": 1 practical example (<= 2 sentences)
- "qa": an object with "question" and "answer" (short, factual)

Constraints:
- No markdown. No code fences. No extra text.
- Keep language as English for this step.
"#,
        count = count,
        topic = topic,
        difficulty = difficulty.label(),
    )
}

/// Prompt translating the cards into every language at once.
///
/// `languages` is the full list, English included; the reply is expected to
/// be an object keyed by language name.
pub fn batch_translation_prompt(languages: &[String], cards_json: &str) -> String {
    format!(
        r#"You are a multilingual translator. Translate the JSON flashcards provided below from English into the requested target languages.
Keep JSON structure identical. For each target language, produce a key with the language name mapping to the list of cards.
Translate fields: "term", "definition", "example", "qa.question", "qa.answer".
Do not add or remove fields. Do not include any commentary. Output JSON only.
Target languages: {languages}

INPUT_JSON:
{cards_json}
"#,
        languages = languages.join(", "),
        cards_json = cards_json,
    )
}

/// Prompt translating the cards into a single language
pub fn single_translation_prompt(language: &str, cards_json: &str) -> String {
    format!(
        r#"Translate the following list of flashcards from English into {language}.
Keep EXACT same JSON structure (JSON array of objects with keys: term, definition, example, qa={{question,answer}}).
Output JSON ONLY (no commentary, no markdown).

INPUT_JSON:
{cards_json}
"#,
        language = language,
        cards_json = cards_json,
    )
}
