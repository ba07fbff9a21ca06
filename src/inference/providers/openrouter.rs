//! OpenRouter provider implementation using the Responses API.
//!
//! The deck is requested in a single non-streaming call with a JSON-schema
//! text format, so the whole card list arrives in one `output_text`.

use async_trait::async_trait;
use log::debug;

use super::responses;
use crate::core::card::VocabularyCard;
use crate::inference::{DeckGenerator, DeckRequest, ProviderError, parse_cards};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter API provider using Responses API
pub struct OpenRouterProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenRouterProvider {
    /// Creates a new OpenRouter provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenRouter API key
    /// * `model` - Model slug, e.g. `google/gemini-2.5-flash`
    /// * `base_url` - Optional custom base URL (defaults to OpenRouter's API)
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeckGenerator for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, request: &DeckRequest) -> Result<Vec<VocabularyCard>, ProviderError> {
        let body = responses::build_request(&self.model, request)?;
        let response = responses::send(
            &self.client,
            self.name(),
            &self.base_url,
            Some(&self.api_key),
            &body,
        )
        .await?;

        let text = responses::output_text(&response)
            .ok_or_else(|| ProviderError::Parse("No data returned from OpenRouter".to_string()))?;
        debug!("OpenRouter returned {} bytes of card JSON", text.len());

        parse_cards(&text)
    }
}
