//! # Session Controller
//!
//! The flashcard state machine. One `Session` drives one learner through
//! start → loading → playing → summary (or error), then back to start.
//!
//! ```text
//!             configure
//!              ┌────┐
//!              ▼    │
//!   ┌──────► Start ─┘
//!   │          │ begin_session
//!   │          ▼
//!   │       Loading ──── failure / empty deck ───► Error
//!   │          │ deck ready                          │
//!   │          ▼                                     │
//!   │       Playing ◄─┐ flip, judge + advance        │
//!   │          │      │ (cursor + 1 < len)           │
//!   │          │ ─────┘                              │
//!   │          ▼ last card advanced                  │
//!   │       Summary                                  │
//!   │          │                                     │
//!   └──────────┴──────────── restart ◄───────────────┘
//! ```
//!
//! Generation and the post-judgment pause are asynchronous, so both are
//! split into a request half and a completion half. Every request is
//! stamped with the session epoch; `restart` bumps the epoch, and anything
//! arriving with an older stamp is dropped.

use log::{debug, info, warn};

use crate::core::card::{Deck, VocabularyCard};
use crate::core::stats::SessionStats;
use crate::core::topic::{Difficulty, Topic};
use crate::inference::{DeckGenerator, DeckRequest, ProviderError};

/// Cards requested per session unless configured otherwise.
pub const DEFAULT_DECK_SIZE: usize = 10;

/// Shown on the error screen whenever generation fails.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate flashcards. Please try again or check your API key.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Start,
    Loading,
    Playing { cursor: usize, is_flipped: bool },
    Summary,
    Error { message: String },
}

/// Transient result shown after a judgment. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Missed,
}

/// Identifies the card a pending advance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    pub epoch: u64,
    pub cursor: usize,
}

/// Returned by a successful `judge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Judgment {
    pub feedback: Feedback,
    pub token: AdvanceToken,
}

/// An outstanding deck request, tagged with the epoch it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub epoch: u64,
    pub request: DeckRequest,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub state: &'a SessionState,
    pub deck: Option<&'a Deck>,
    pub cursor: Option<usize>,
    pub is_flipped: bool,
    pub stats: &'a SessionStats,
    pub error_message: Option<&'a str>,
    pub pending_feedback: Option<Feedback>,
    pub topic: Topic,
    pub difficulty: Difficulty,
}

pub struct Session {
    state: SessionState,
    topic: Topic,
    difficulty: Difficulty,
    deck_size: usize,
    deck: Option<Deck>,
    stats: SessionStats,
    epoch: u64,
    /// Set between `judge` and the matching `advance`.
    pending_feedback: Option<Feedback>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Topic::default(), Difficulty::default(), DEFAULT_DECK_SIZE)
    }
}

impl Session {
    pub fn new(topic: Topic, difficulty: Difficulty, deck_size: usize) -> Self {
        Self {
            state: SessionState::Start,
            topic,
            difficulty,
            deck_size: deck_size.max(1),
            deck: None,
            stats: SessionStats::default(),
            epoch: 0,
            pending_feedback: None,
        }
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Chooses topic and difficulty for the next session. Start screen only.
    pub fn configure(&mut self, topic: Topic, difficulty: Difficulty) -> bool {
        if self.state != SessionState::Start {
            debug!("configure ignored in state {:?}", self.state);
            return false;
        }
        self.topic = topic;
        self.difficulty = difficulty;
        true
    }

    /// Moves to `Loading` and returns the request the caller must run.
    pub fn begin_session(&mut self) -> Option<GenerationTicket> {
        if self.state != SessionState::Start {
            debug!("begin_session ignored in state {:?}", self.state);
            return None;
        }
        self.epoch += 1;
        self.state = SessionState::Loading;
        info!(
            "Session {} loading: topic={}, difficulty={}, count={}",
            self.epoch,
            self.topic.label(),
            self.difficulty.label(),
            self.deck_size
        );
        Some(GenerationTicket {
            epoch: self.epoch,
            request: DeckRequest {
                topic: self.topic,
                difficulty: self.difficulty,
                count: self.deck_size,
            },
        })
    }

    /// Resolves a ticket from `begin_session`. Returns `false` if the result
    /// was stale and therefore discarded.
    pub fn complete_generation(
        &mut self,
        epoch: u64,
        result: Result<Vec<VocabularyCard>, ProviderError>,
    ) -> bool {
        if epoch != self.epoch || self.state != SessionState::Loading {
            debug!(
                "Discarding generation result for epoch {} (current epoch {}, state {:?})",
                epoch, self.epoch, self.state
            );
            return false;
        }

        let deck = result.map_err(|e| e.to_string()).and_then(|mut cards| {
            if cards.len() > self.deck_size {
                debug!(
                    "Generator returned {} cards, keeping the first {}",
                    cards.len(),
                    self.deck_size
                );
                cards.truncate(self.deck_size);
            }
            Deck::new(cards).map_err(|e| e.to_string())
        });

        match deck {
            Ok(deck) => {
                info!("Session {} playing with {} cards", self.epoch, deck.len());
                self.stats = SessionStats::for_deck(deck.len());
                self.deck = Some(deck);
                self.pending_feedback = None;
                self.state = SessionState::Playing {
                    cursor: 0,
                    is_flipped: false,
                };
            }
            Err(reason) => {
                warn!("Session {} failed to generate deck: {}", self.epoch, reason);
                self.state = SessionState::Error {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Runs `begin_session`, awaits the generator, then completes. The
    /// caller is suspended for the whole generation.
    pub async fn begin_session_with(&mut self, generator: &dyn DeckGenerator) -> bool {
        let Some(ticket) = self.begin_session() else {
            return false;
        };
        let result = generator.generate(&ticket.request).await;
        self.complete_generation(ticket.epoch, result)
    }

    /// Shows the other face of the current card.
    pub fn flip(&mut self) -> bool {
        if self.pending_feedback.is_some() {
            debug!("flip ignored while a judgment is pending");
            return false;
        }
        match &mut self.state {
            SessionState::Playing { is_flipped, .. } => {
                *is_flipped = !*is_flipped;
                true
            }
            other => {
                debug!("flip ignored in state {:?}", other);
                false
            }
        }
    }

    /// Scores the current card. The cursor does not move until `advance`
    /// is called with the returned token.
    pub fn judge(&mut self, known: bool) -> Option<Judgment> {
        let SessionState::Playing { cursor, .. } = self.state else {
            debug!("judge ignored in state {:?}", self.state);
            return None;
        };
        if self.pending_feedback.is_some() {
            debug!("judge ignored: card {} already judged", cursor);
            return None;
        }
        let card = self.deck.as_ref()?.get(cursor)?;

        self.stats.record(card, known);
        let feedback = if known {
            Feedback::Success
        } else {
            Feedback::Missed
        };
        self.pending_feedback = Some(feedback);
        debug!("Card {} judged {:?}", cursor, feedback);

        Some(Judgment {
            feedback,
            token: AdvanceToken {
                epoch: self.epoch,
                cursor,
            },
        })
    }

    /// Completes a judgment: next card, or the summary after the last one.
    pub fn advance(&mut self, token: AdvanceToken) -> bool {
        let SessionState::Playing { cursor, .. } = self.state else {
            debug!("advance ignored in state {:?}", self.state);
            return false;
        };
        if token.epoch != self.epoch || token.cursor != cursor || self.pending_feedback.is_none() {
            debug!(
                "Discarding stale advance {:?} (epoch {}, cursor {})",
                token, self.epoch, cursor
            );
            return false;
        }
        let len = self.deck.as_ref().map_or(0, Deck::len);

        self.pending_feedback = None;
        if cursor + 1 < len {
            self.state = SessionState::Playing {
                cursor: cursor + 1,
                is_flipped: false,
            };
        } else {
            info!(
                "Session {} complete: {}/{} known",
                self.epoch, self.stats.correct, self.stats.total
            );
            self.state = SessionState::Summary;
        }
        true
    }

    /// Drops the deck and stats and returns to `Start`. Topic and
    /// difficulty are kept. Valid from any state.
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.state = SessionState::Start;
        self.deck = None;
        self.stats = SessionStats::default();
        self.pending_feedback = None;
        debug!("Session restarted (epoch {})", self.epoch);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_feedback(&self) -> Option<Feedback> {
        self.pending_feedback
    }

    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            SessionState::Playing { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    pub fn is_flipped(&self) -> bool {
        matches!(
            self.state,
            SessionState::Playing {
                is_flipped: true,
                ..
            }
        )
    }

    pub fn current_card(&self) -> Option<&VocabularyCard> {
        self.deck.as_ref()?.get(self.cursor()?)
    }

    /// `cursor / len` while playing.
    pub fn progress(&self) -> Option<f64> {
        let cursor = self.cursor()?;
        let len = self.deck.as_ref()?.len();
        Some(cursor as f64 / len as f64)
    }

    /// Final score, only meaningful on the summary screen.
    pub fn score_percentage(&self) -> Option<u32> {
        match self.state {
            SessionState::Summary => self.stats.score_percentage(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            state: &self.state,
            deck: self.deck.as_ref(),
            cursor: self.cursor(),
            is_flipped: self.is_flipped(),
            stats: &self.stats,
            error_message: match &self.state {
                SessionState::Error { message } => Some(message.as_str()),
                _ => None,
            },
            pending_feedback: self.pending_feedback,
            topic: self.topic,
            difficulty: self.difficulty,
        }
    }
}
