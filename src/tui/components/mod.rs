//! # TUI Components
//!
//! One component per screen, plus the pieces they share.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: app name, topic/level, status
//! - `LoadingView`, `ErrorView`
//! - `FlashcardView`: one card face
//! - `PlayingView`: progress gauge, card, judge controls
//! - `FeedbackOverlay`: popup between judge and advance
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state across frames and emit events:
//! - `StartScreenState`: which picker has focus
//! - `SummaryState`: scroll offset of the review list
//!
//! Chosen topic, level, deck and stats always come from the core session;
//! components never mutate it.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── start_screen.rs
//! ├── loading.rs
//! ├── flashcard.rs
//! ├── playing.rs
//! ├── feedback.rs
//! ├── summary.rs
//! └── error_view.rs
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod error_view;
pub mod feedback;
pub mod flashcard;
pub mod loading;
pub mod playing;
pub mod start_screen;
pub mod summary;

pub use error_view::ErrorView;
pub use feedback::pick_message;
pub use loading::LoadingView;
pub use playing::PlayingView;
pub use start_screen::{StartEvent, StartScreen, StartScreenState};
pub use summary::{SummaryEvent, SummaryState, SummaryView};
