//! # Core Application Logic
//!
//! This module contains LingoFlash's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state       │
//!                    │    machine + stats)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Deck     │      │  Embedder  │
//!     │  Adapter   │      │ Generator  │      │ (library   │
//!     │ (ratatui)  │      │ (LLM API)  │      │   users)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`]: The `Session` controller, the five-state machine
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`state`]: The `App` struct wrapping the session and its generator
//! - [`card`], [`stats`], [`topic`]: the data model
//! - [`config`]: file/env/CLI settings

pub mod action;
pub mod card;
pub mod config;
pub mod session;
pub mod state;
pub mod stats;
pub mod topic;

// Re-export commonly used types for convenience
pub use card::{Deck, VocabularyCard};
pub use session::{Session, SessionState};
pub use stats::SessionStats;
pub use topic::{Difficulty, Topic};
