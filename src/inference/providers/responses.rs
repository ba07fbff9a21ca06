//! Shared wire types for the OpenAI-style Responses API.
//!
//! OpenRouter and LM Studio both expose `/responses`. Decks are requested
//! non-streaming with a JSON-schema text format, and the reply's
//! `output_text` parts are concatenated back into the model text.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{DeckPayload, DeckRequest, ProviderError, build_prompt};

const SYSTEM_INSTRUCTION: &str = "You are a friendly English vocabulary tutor. \
    Reply only with JSON matching the requested schema.";

// ============================================================================
// Request Types
// ============================================================================

/// Role in an input message (OpenAI terminology)
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type")]
pub(crate) enum InputItem {
    #[serde(rename = "message")]
    Message { role: Role, content: String },
}

#[derive(Serialize, Debug)]
pub(crate) struct TextFormat {
    #[serde(rename = "type")]
    format_type: &'static str, // always "json_schema"
    name: &'static str,
    schema: serde_json::Value,
    strict: bool,
}

#[derive(Serialize, Debug)]
pub(crate) struct TextConfig {
    format: TextFormat,
}

/// The request body for the Responses API
#[derive(Serialize, Debug)]
pub(crate) struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputItem>,
    pub text: TextConfig,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Deserialize, Debug)]
pub(crate) struct ResponsesResponse {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize, Debug)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize, Debug)]
struct OutputContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

/// JSON schema for `{"cards": [...]}`, derived from the card type.
fn deck_schema() -> Result<serde_json::Value, ProviderError> {
    serde_json::to_value(schemars::schema_for!(DeckPayload))
        .map_err(|e| ProviderError::Config(format!("schema generation failed: {e}")))
}

pub(crate) fn build_request(
    model: &str,
    request: &DeckRequest,
) -> Result<ResponsesRequest, ProviderError> {
    Ok(ResponsesRequest {
        model: model.to_string(),
        input: vec![
            InputItem::Message {
                role: Role::System,
                content: SYSTEM_INSTRUCTION.to_string(),
            },
            InputItem::Message {
                role: Role::User,
                content: build_prompt(request),
            },
        ],
        text: TextConfig {
            format: TextFormat {
                format_type: "json_schema",
                name: "vocabulary_deck",
                schema: deck_schema()?,
                strict: false,
            },
        },
    })
}

/// Joins every `output_text` part of every `message` output item.
/// Reasoning items are skipped.
pub(crate) fn output_text(response: &ResponsesResponse) -> Option<String> {
    let text: String = response
        .output
        .iter()
        .filter(|item| item.item_type == "message")
        .flat_map(|item| item.content.iter())
        .filter(|c| c.content_type == "output_text")
        .map(|c| c.text.as_str())
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// POSTs to `{base_url}/responses` and decodes the reply.
pub(crate) async fn send(
    client: &reqwest::Client,
    provider: &str,
    base_url: &str,
    api_key: Option<&str>,
    body: &ResponsesRequest,
) -> Result<ResponsesResponse, ProviderError> {
    let json_body = serde_json::to_string(body)
        .map_err(|e| ProviderError::Network(format!("Request serialization failed: {e}")))?;
    info!(
        "{} Responses API request: model={}, {} bytes",
        provider,
        body.model,
        json_body.len()
    );

    let mut builder = client
        .post(format!("{}/responses", base_url))
        .header("Content-Type", "application/json")
        .body(json_body);
    if let Some(key) = api_key {
        builder = builder.header("Authorization", format!("Bearer {}", key));
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    debug!("{} response status: {}", provider, response.status());

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let err_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("{} API error: {} - {}", provider, status, err_body);
        return Err(ProviderError::Api {
            status,
            message: err_body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::Parse(e.to_string()))
}
