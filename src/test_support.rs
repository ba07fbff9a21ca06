//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::core::card::VocabularyCard;
use crate::core::session::Session;
use crate::core::state::App;
use crate::inference::{DeckGenerator, DeckRequest, ProviderError};

/// `n` distinct cards: word-0, word-1, ...
pub fn sample_cards(n: usize) -> Vec<VocabularyCard> {
    (0..n)
        .map(|i| VocabularyCard {
            word: format!("word-{i}"),
            pronunciation: format!("/wɜːd {i}/"),
            part_of_speech: "noun".to_string(),
            definition: format!("Definition number {i}."),
            example: format!("Example sentence {i}."),
        })
        .collect()
}

/// A generator that returns a fixed result and records every request.
pub struct ScriptedGenerator {
    cards: Option<Vec<VocabularyCard>>,
    requests: Mutex<Vec<DeckRequest>>,
}

impl ScriptedGenerator {
    pub fn cards(cards: Vec<VocabularyCard>) -> Self {
        Self {
            cards: Some(cards),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            cards: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DeckRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeckGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &DeckRequest) -> Result<Vec<VocabularyCard>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.cards
            .clone()
            .ok_or_else(|| ProviderError::Network("scripted failure".to_string()))
    }
}

/// A session already in `Playing` at cursor 0 with `n` sample cards.
pub fn playing_session(n: usize) -> Session {
    let mut session = Session::default();
    let ticket = session.begin_session().unwrap();
    session.complete_generation(ticket.epoch, Ok(sample_cards(n)));
    session
}

/// Creates a test App backed by a generator that returns three cards.
pub fn test_app() -> App {
    App::new(Arc::new(ScriptedGenerator::cards(sample_cards(3))))
}
