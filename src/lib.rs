//! LingoFlash library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which hosted (or local) model service generates decks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "lmstudio")]
    LmStudio,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
            Provider::LmStudio => "lmstudio",
        }
    }
}
