//! Google Gemini provider using `generateContent` with structured output.
//!
//! Gemini accepts an OpenAPI-style `responseSchema`, so the model is asked
//! for a bare JSON array of card objects with all five fields required.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::card::VocabularyCard;
use crate::inference::{DeckGenerator, DeckRequest, ProviderError, build_prompt, parse_cards};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

// ============================================================================
// Gemini generateContent Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// Schema for an array of cards, all fields required.
fn card_list_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "word": { "type": "STRING" },
                "pronunciation": { "type": "STRING" },
                "partOfSpeech": { "type": "STRING" },
                "definition": { "type": "STRING" },
                "example": { "type": "STRING" }
            },
            "required": ["word", "pronunciation", "partOfSpeech", "definition", "example"]
        }
    })
}

fn build_request(request: &DeckRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: build_prompt(request),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: card_list_schema(),
        },
    }
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.first()?;
    if let Some(reason) = &candidate.finish_reason
        && reason != "STOP"
    {
        debug!("Gemini candidate finished with reason {}", reason);
    }
    let text: String = candidate
        .content
        .as_ref()?
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct GeminiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `api_key` - Google AI Studio API key
    /// * `model` - Model name, e.g. `gemini-2.5-flash`
    /// * `base_url` - Optional custom base URL (defaults to the public v1beta API)
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DeckGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &DeckRequest) -> Result<Vec<VocabularyCard>, ProviderError> {
        let body = build_request(request);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        info!(
            "Gemini request: model={}, topic={}, difficulty={}, count={}",
            self.model,
            request.topic.label(),
            request.difficulty.label(),
            request.count
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let text = response_text(&parsed)
            .ok_or_else(|| ProviderError::Parse("No data returned from Gemini".to_string()))?;
        debug!("Gemini returned {} bytes of card JSON", text.len());

        parse_cards(&text)
    }
}
