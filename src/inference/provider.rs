use std::fmt;

use async_trait::async_trait;

use crate::core::card::VocabularyCard;
use crate::core::topic::{Difficulty, Topic};

/// Errors that can occur while generating a deck.
/// The session controller only reports these as a single failure; the
/// variants exist for logging.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// The response did not contain a usable card list.
    Parse(String),
    /// The caller gave up waiting.
    Timeout(u64),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
            ProviderError::Timeout(secs) => write!(f, "no response after {secs}s"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a generator needs to produce a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub count: usize,
}

#[async_trait]
pub trait DeckGenerator: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Produces up to `request.count` cards, in presentation order.
    async fn generate(&self, request: &DeckRequest) -> Result<Vec<VocabularyCard>, ProviderError>;
}
