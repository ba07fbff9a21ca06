pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{DeckGenerator, DeckRequest, ProviderError};
pub use providers::{GeminiProvider, LmStudioProvider, OpenRouterProvider};
pub use types::{DeckPayload, build_prompt, parse_cards};
