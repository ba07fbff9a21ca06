//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! `update()` never performs I/O. It returns an `Effect` and this loop acts
//! on it:
//!
//! - `GenerateDeck`: spawns the generator call (under the configured timeout)
//!   and posts `Action::DeckGenerated` back over the channel.
//! - `ScheduleAdvance`: picks a feedback message, sleeps for the feedback
//!   delay, then posts `Action::Advance`.
//! - `CancelPending`: aborts both kinds of task.
//!
//! Results from aborted or superseded tasks that still arrive are discarded
//! by the session's epoch check, so aborting is only about not wasting work.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or channel traffic.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::Provider;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::{AdvanceToken, GenerationTicket, SessionState};
use crate::core::state::App;
use crate::inference::{
    DeckGenerator, GeminiProvider, LmStudioProvider, OpenRouterProvider, ProviderError,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    StartEvent, StartScreenState, SummaryEvent, SummaryState, pick_message,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub start_screen: StartScreenState,
    pub summary: SummaryState,
    /// Text for the feedback popup of the card currently being judged.
    pub feedback_message: &'static str,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            start_screen: StartScreenState::default(),
            summary: SummaryState::default(),
            feedback_message: "",
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build a deck generator from a resolved config's provider and credentials.
pub fn build_provider(config: &ResolvedConfig) -> Result<Arc<dyn DeckGenerator>, ProviderError> {
    match config.provider {
        Provider::Gemini => {
            let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                ProviderError::Config(
                    "Gemini API key must be set (config file, GEMINI_API_KEY or API_KEY env var, or --provider lmstudio)"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(GeminiProvider::new(
                api_key,
                config.model_name.clone(),
                Some(config.gemini_base_url.clone()),
            )))
        }
        Provider::OpenRouter => {
            let api_key = config.openrouter_api_key.clone().ok_or_else(|| {
                ProviderError::Config(
                    "OpenRouter API key must be set (config file or OPENROUTER_API_KEY env var)"
                        .to_string(),
                )
            })?;
            Ok(Arc::new(OpenRouterProvider::new(
                api_key,
                config.model_name.clone(),
                Some(config.openrouter_base_url.clone()),
            )))
        }
        Provider::LmStudio => Ok(Arc::new(LmStudioProvider::new(
            config.model_name.clone(),
            Some(config.lmstudio_base_url.clone()),
        ))),
    }
}

/// Outstanding background tasks, tracked so Restart can abort them.
#[derive(Default)]
struct PendingTasks {
    generation: Option<tokio::task::AbortHandle>,
    advance: Option<tokio::task::AbortHandle>,
}

impl PendingTasks {
    fn abort_all(&mut self) {
        if let Some(handle) = self.generation.take() {
            debug!("Aborting generation task");
            handle.abort();
        }
        if let Some(handle) = self.advance.take() {
            debug!("Aborting advance task");
            handle.abort();
        }
    }
}

/// Maps a key press to an `Action` for the current screen.
///
/// Screen-local navigation (picker focus, summary scrolling) is absorbed by
/// the component states and yields `None`.
fn map_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Restart => return Some(Action::Restart),
        _ => {}
    }

    match app.session.state() {
        SessionState::Start => match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => tui
                .start_screen
                .handle_event(event)
                .map(|start_event| match start_event {
                    StartEvent::CycleTopic { forward } => Action::CycleTopic { forward },
                    StartEvent::CycleDifficulty { forward } => Action::CycleDifficulty { forward },
                    StartEvent::Begin => Action::BeginSession,
                }),
        },
        SessionState::Loading => match event {
            TuiEvent::Escape => Some(Action::Restart),
            _ => None,
        },
        SessionState::Playing { is_flipped, .. } => match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar(' ') | TuiEvent::Submit => Some(Action::Flip),
            // Judging only makes sense once the answer is visible
            TuiEvent::CursorRight | TuiEvent::InputChar('k') if *is_flipped => {
                Some(Action::Judge { known: true })
            }
            TuiEvent::CursorLeft | TuiEvent::InputChar('s') if *is_flipped => {
                Some(Action::Judge { known: false })
            }
            _ => None,
        },
        SessionState::Summary => match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => tui.summary.handle_event(event).map(|summary_event| match summary_event {
                SummaryEvent::PlayAgain => Action::Restart,
            }),
        },
        SessionState::Error { .. } => match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::Submit | TuiEvent::InputChar('r') => Some(Action::Restart),
            _ => None,
        },
    }
}

/// Performs one `Effect`. Returns `true` when the loop should exit.
fn apply_effect(
    effect: Effect,
    app: &App,
    tui: &mut TuiState,
    pending: &mut PendingTasks,
    generation_timeout: Duration,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::GenerateDeck(ticket) => {
            if let Some(previous) = pending.generation.take() {
                previous.abort();
            }
            tui.summary.reset();
            pending.generation = Some(spawn_generation(
                app.generator.clone(),
                ticket,
                generation_timeout,
                tx.clone(),
            ));
        }
        Effect::ScheduleAdvance {
            token,
            delay,
            feedback,
        } => {
            tui.feedback_message = pick_message(feedback, &mut rand::thread_rng());
            if let Some(previous) = pending.advance.take() {
                previous.abort();
            }
            pending.advance = Some(spawn_advance(token, delay, tx.clone()));
        }
        Effect::CancelPending => {
            pending.abort_all();
            tui.summary.reset();
        }
    }
    false
}

pub fn run(config: ResolvedConfig, generator: Arc<dyn DeckGenerator>) -> std::io::Result<()> {
    let mut app = App::from_config(generator, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut pending = PendingTasks::default();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        let animating = matches!(app.session.state(), SessionState::Loading);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = map_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Key mapped to {:?}", action);
            let effect = update(&mut app, action);
            if apply_effect(
                effect,
                &app,
                &mut tui,
                &mut pending,
                config.generation_timeout,
                &tx,
            ) {
                should_quit = true;
                break;
            }
        }

        // Handle background task results
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match &action {
                Action::DeckGenerated { .. } => pending.generation = None,
                Action::Advance(_) => pending.advance = None,
                _ => {}
            }
            let effect = update(&mut app, action);
            should_quit = apply_effect(
                effect,
                &app,
                &mut tui,
                &mut pending,
                config.generation_timeout,
                &tx,
            );
        }
    }

    pending.abort_all();
    ratatui::restore();
    info!("LingoFlash exiting");
    Ok(())
}

fn spawn_generation(
    generator: Arc<dyn DeckGenerator>,
    ticket: GenerationTicket,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!(
        "Spawning deck generation via {} (epoch={}, count={})",
        generator.name(),
        ticket.epoch,
        ticket.request.count
    );
    let handle = tokio::spawn(async move {
        let request_start = std::time::Instant::now();
        let result = match tokio::time::timeout(timeout, generator.generate(&ticket.request)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Deck generation timed out after {}s (epoch={})",
                    timeout.as_secs(),
                    ticket.epoch
                );
                Err(ProviderError::Timeout(timeout.as_secs()))
            }
        };
        debug!(
            "Deck generation finished in {}ms (epoch={}, ok={})",
            request_start.elapsed().as_millis(),
            ticket.epoch,
            result.is_ok()
        );
        if tx
            .send(Action::DeckGenerated {
                epoch: ticket.epoch,
                result,
            })
            .is_err()
        {
            warn!(
                "Failed to send generation result for epoch={}: receiver dropped",
                ticket.epoch
            );
        }
    });
    handle.abort_handle()
}

fn spawn_advance(
    token: AdvanceToken,
    delay: Duration,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if tx.send(Action::Advance(token)).is_err() {
            warn!("Failed to send advance: receiver dropped");
        }
    });
    handle.abort_handle()
}
