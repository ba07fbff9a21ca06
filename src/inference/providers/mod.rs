pub mod gemini;
pub mod lmstudio;
pub mod openrouter;
mod responses;

pub use gemini::GeminiProvider;
pub use lmstudio::LmStudioProvider;
pub use openrouter::OpenRouterProvider;
