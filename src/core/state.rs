//! # Application State
//!
//! Core business state for LingoFlash. Domain logic only, no TUI-specific
//! types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── generator: Arc<dyn DeckGenerator>  // deck source (LLM provider)
//! ├── session: Session                   // the flashcard state machine
//! ├── feedback_delay: Duration           // pause between judge and advance
//! ├── status_message: String             // header text
//! └── should_quit: bool
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{DEFAULT_FEEDBACK_DELAY_MS, ResolvedConfig};
use crate::core::session::{DEFAULT_DECK_SIZE, Session};
use crate::core::topic::{Difficulty, Topic};
use crate::inference::DeckGenerator;

pub struct App {
    pub generator: Arc<dyn DeckGenerator>,
    pub session: Session,
    pub feedback_delay: Duration,
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(generator: Arc<dyn DeckGenerator>) -> Self {
        Self {
            generator,
            session: Session::new(Topic::default(), Difficulty::default(), DEFAULT_DECK_SIZE),
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn from_config(generator: Arc<dyn DeckGenerator>, config: &ResolvedConfig) -> Self {
        Self {
            session: Session::new(config.topic, config.difficulty, config.deck_size),
            feedback_delay: config.feedback_delay,
            ..Self::new(generator)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::session::SessionState;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.session.state(), &SessionState::Start);
        assert_eq!(app.feedback_delay.as_millis(), 1200);
        assert_eq!(app.generator.name(), "scripted");
        assert!(!app.should_quit);
    }
}
