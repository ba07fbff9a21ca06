//! # Cards and Decks
//!
//! A `VocabularyCard` is an immutable value produced by a deck generator.
//! A `Deck` is the ordered, non-empty list of cards a session plays through.

use std::fmt;
use std::ops::Index;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single vocabulary flashcard.
///
/// Field names on the wire are camelCase (`partOfSpeech`), matching what
/// the generators are asked to emit.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyCard {
    pub word: String,
    /// Phonetic spelling, usually IPA.
    pub pronunciation: String,
    pub part_of_speech: String,
    pub definition: String,
    pub example: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeckError {
    /// The generator returned zero cards.
    Empty,
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Empty => write!(f, "deck contains no cards"),
        }
    }
}

impl std::error::Error for DeckError {}

/// Ordered, fixed-length sequence of cards. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<VocabularyCard>,
}

impl Deck {
    pub fn new(cards: Vec<VocabularyCard>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    // A Deck can't be empty, but clippy expects the pair.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyCard> {
        self.cards.get(index)
    }

    pub fn cards(&self) -> &[VocabularyCard] {
        &self.cards
    }
}

impl Index<usize> for Deck {
    type Output = VocabularyCard;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cards[index]
    }
}
