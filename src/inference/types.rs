//! Provider-neutral prompt and response handling.
//!
//! Every provider sends the same prompt and gets back model text that should
//! hold a JSON card list. Models are inconsistent about the outer shape, so
//! both a bare array and `{"cards": [...]}` are accepted, with or without a
//! markdown code fence around them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::card::VocabularyCard;
use crate::inference::{DeckRequest, ProviderError};

/// Object wrapper used when a provider's structured output needs an
/// object at the root.
#[derive(Serialize, Deserialize, JsonSchema, Debug)]
pub struct DeckPayload {
    pub cards: Vec<VocabularyCard>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeckShape {
    Bare(Vec<VocabularyCard>),
    Wrapped(DeckPayload),
}

/// Builds the instruction sent to the model.
pub fn build_prompt(request: &DeckRequest) -> String {
    format!(
        "Generate {count} English vocabulary words related to the topic \"{topic}\" at a \"{difficulty}\" difficulty level.\n\
         \n\
         Requirements:\n\
         1. Words should be distinct, fun, and useful for a learner.\n\
         2. Definitions must be simple, clear, and easy to memorize (avoid overly academic language).\n\
         3. Example sentences should be engaging or slightly humorous if possible to help memory retention.\n\
         4. Include phonetic pronunciation (IPA).\n\
         \n\
         Output JSON format.",
        count = request.count,
        topic = request.topic.label(),
        difficulty = request.difficulty.label(),
    )
}

/// Removes a surrounding ```json ... ``` fence if present.
///
/// The info string runs to the first newline, unless the fence and the
/// payload share a line (```` ```json [...] ``` ````).
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let info_end = rest
        .find('\n')
        .unwrap_or(rest.len())
        .min(rest.find(['[', '{']).unwrap_or(rest.len()));
    let body = rest[info_end..].trim();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses model output into cards.
pub fn parse_cards(text: &str) -> Result<Vec<VocabularyCard>, ProviderError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ProviderError::Parse("No data returned from model".to_string()));
    }
    match serde_json::from_str::<DeckShape>(body) {
        Ok(DeckShape::Bare(cards)) => Ok(cards),
        Ok(DeckShape::Wrapped(payload)) => Ok(payload.cards),
        Err(e) => Err(ProviderError::Parse(format!(
            "response is not a card list: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::{Difficulty, Topic};

    const ONE_CARD: &str = r#"{"word":"wanderlust","pronunciation":"/ˈwɒndəlʌst/","partOfSpeech":"noun","definition":"A strong wish to travel.","example":"My wanderlust kicks in every Monday."}"#;

    #[test]
    fn test_prompt_mentions_request() {
        let prompt = build_prompt(&DeckRequest {
            topic: Topic::TravelAdventure,
            difficulty: Difficulty::Advanced,
            count: 7,
        });
        assert!(prompt.starts_with("Generate 7 English vocabulary words"));
        assert!(prompt.contains("\"Travel & Adventure\""));
        assert!(prompt.contains("\"Advanced\" difficulty"));
        assert!(prompt.contains("IPA"));
    }

    #[test]
    fn test_parse_bare_array() {
        let cards = parse_cards(&format!("[{ONE_CARD}]")).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].word, "wanderlust");
        assert_eq!(cards[0].part_of_speech, "noun");
    }

    #[test]
    fn test_parse_wrapped_object() {
        let cards = parse_cards(&format!(r#"{{"cards":[{ONE_CARD},{ONE_CARD}]}}"#)).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_parse_fenced_output() {
        let text = format!("```json\n[{ONE_CARD}]\n```\n");
        let cards = parse_cards(&text).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_parse_fence_on_one_line() {
        for text in [
            format!("```json [{ONE_CARD}] ```"),
            format!("```[{ONE_CARD}]```"),
            format!("```json {{\"cards\":[{ONE_CARD}]}}```"),
        ] {
            let cards = parse_cards(&text).unwrap();
            assert_eq!(cards.len(), 1, "{text}");
            assert_eq!(cards[0].word, "wanderlust");
        }
    }

    #[test]
    fn test_parse_empty_array_is_ok() {
        // Emptiness is the session's call, not the parser's
        assert!(parse_cards("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_blank_text_fails() {
        assert!(matches!(parse_cards("   "), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_parse_schema_mismatch_fails() {
        let result = parse_cards(r#"[{"word":"only a word"}]"#);
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  [1]  "), "[1]");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
    }
}
