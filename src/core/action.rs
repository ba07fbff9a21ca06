//! # Actions
//!
//! Everything that can happen in LingoFlash becomes an `Action`.
//! User presses Space? That's `Action::Flip`.
//! The deck generator answers? That's `Action::DeckGenerated { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must perform. No I/O here: spawning the generator
//! and sleeping before an advance both happen in the adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::debug;

use crate::core::card::VocabularyCard;
use crate::core::session::{AdvanceToken, Feedback, GenerationTicket, SessionState};
use crate::core::state::App;
use crate::core::topic::{Difficulty, Topic};
use crate::inference::ProviderError;

#[derive(Debug)]
pub enum Action {
    Configure { topic: Topic, difficulty: Difficulty },
    CycleTopic { forward: bool },
    CycleDifficulty { forward: bool },
    BeginSession,
    DeckGenerated {
        epoch: u64,
        result: Result<Vec<VocabularyCard>, ProviderError>,
    },
    Flip,
    Judge { known: bool },
    /// The feedback pause for a judged card has elapsed.
    Advance(AdvanceToken),
    Restart,
    Quit,
}

/// Side effects requested by `update`, performed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    GenerateDeck(GenerationTicket),
    ScheduleAdvance {
        token: AdvanceToken,
        delay: Duration,
        feedback: Feedback,
    },
    /// Abort outstanding generation and advance tasks.
    CancelPending,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Configure { topic, difficulty } => {
            app.session.configure(topic, difficulty);
            Effect::None
        }
        Action::CycleTopic { forward } => {
            let topic = app.session.topic();
            let next = if forward { topic.next() } else { topic.prev() };
            app.session.configure(next, app.session.difficulty());
            Effect::None
        }
        Action::CycleDifficulty { forward } => {
            let difficulty = app.session.difficulty();
            let next = if forward {
                difficulty.next()
            } else {
                difficulty.prev()
            };
            app.session.configure(app.session.topic(), next);
            Effect::None
        }
        Action::BeginSession => match app.session.begin_session() {
            Some(ticket) => {
                app.status_message = format!("Using {}", app.generator.name());
                Effect::GenerateDeck(ticket)
            }
            None => Effect::None,
        },
        Action::DeckGenerated { epoch, result } => {
            let detail = match &result {
                Ok(cards) if cards.is_empty() => Some("generator returned no cards".to_string()),
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            if app.session.complete_generation(epoch, result) {
                app.status_message = match app.session.state() {
                    SessionState::Error { .. } => detail.unwrap_or_default(),
                    _ => String::new(),
                };
            }
            Effect::None
        }
        Action::Flip => {
            app.session.flip();
            Effect::None
        }
        Action::Judge { known } => match app.session.judge(known) {
            Some(judgment) => Effect::ScheduleAdvance {
                token: judgment.token,
                delay: app.feedback_delay,
                feedback: judgment.feedback,
            },
            None => Effect::None,
        },
        Action::Advance(token) => {
            app.session.advance(token);
            Effect::None
        }
        Action::Restart => {
            app.session.restart();
            app.status_message.clear();
            Effect::CancelPending
        }
        Action::Quit => {
            debug!("Quit requested");
            app.should_quit = true;
            Effect::Quit
        }
    }
}
