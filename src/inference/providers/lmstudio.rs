//! LM Studio provider implementation using the Responses API.
//!
//! LM Studio v0.3.29+ serves `/v1/responses` locally. No API key is sent.
//! Local models are looser about structured output, so the shared parser's
//! code-fence handling matters most here.

use async_trait::async_trait;
use log::debug;

use super::responses;
use crate::core::card::VocabularyCard;
use crate::inference::{DeckGenerator, DeckRequest, ProviderError, parse_cards};

pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

/// LM Studio API provider using Responses API (local inference server)
pub struct LmStudioProvider {
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl LmStudioProvider {
    pub fn new(model: String, base_url: Option<String>) -> Self {
        Self {
            model,
            base_url: base_url.unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeckGenerator for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn generate(&self, request: &DeckRequest) -> Result<Vec<VocabularyCard>, ProviderError> {
        let body = responses::build_request(&self.model, request)?;
        let response =
            responses::send(&self.client, self.name(), &self.base_url, None, &body).await?;

        let text = responses::output_text(&response)
            .ok_or_else(|| ProviderError::Parse("No data returned from LM Studio".to_string()))?;
        debug!("LM Studio returned {} bytes of card JSON", text.len());

        parse_cards(&text)
    }
}
