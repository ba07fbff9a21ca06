use crate::core::session::SessionState;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ErrorView, LoadingView, PlayingView, StartScreen, SummaryView, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

/// Key hints for the footer line.
pub fn footer_hint(state: &SessionState) -> &'static str {
    match state {
        SessionState::Start => "↑/↓ field  ←/→ change  Enter play  Esc quit",
        SessionState::Loading => "Esc cancel  Ctrl+C quit",
        SessionState::Playing {
            is_flipped: false, ..
        } => "Space flip  Ctrl+R restart  Esc quit",
        SessionState::Playing { .. } => "←/s still learning  →/k know it  Space flip  Esc quit",
        SessionState::Summary => "Enter play again  ↑/↓ scroll  Esc quit",
        SessionState::Error { .. } => "Enter try again  Esc quit",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    let session = &app.session;
    let view = session.snapshot();
    let topic_line = matches!(view.state, SessionState::Playing { .. }).then(|| {
        format!("{} • {}", view.topic.label(), view.difficulty.label())
    });
    TitleBar::new(topic_line, app.status_message.clone()).render(frame, title_area);

    match view.state {
        SessionState::Start => StartScreen {
            state: &tui.start_screen,
            topic: view.topic,
            difficulty: view.difficulty,
        }
        .render(frame, main_area),
        SessionState::Loading => LoadingView {
            topic: view.topic,
            spinner_frame,
        }
        .render(frame, main_area),
        SessionState::Playing { cursor, is_flipped } => {
            if let Some(card) = session.current_card() {
                PlayingView {
                    card,
                    cursor: *cursor,
                    total: view.deck.map_or(0, |d| d.len()),
                    progress: session.progress().unwrap_or(0.0),
                    is_flipped: *is_flipped,
                    feedback: view.pending_feedback.map(|f| (f, tui.feedback_message)),
                }
                .render(frame, main_area);
            }
        }
        SessionState::Summary => SummaryView {
            stats: view.stats,
            state: &mut tui.summary,
        }
        .render(frame, main_area),
        SessionState::Error { message } => ErrorView { message }.render(frame, main_area),
    }

    frame.render_widget(
        Span::styled(
            footer_hint(view.state),
            Style::default().fg(Color::DarkGray),
        ),
        footer_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{sample_cards, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_draw_start_screen() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);

        assert!(text.contains("LingoFlash"));
        assert!(text.contains("Pick a Topic"));
        assert!(text.contains("Enter play"));
    }

    #[test]
    fn test_draw_follows_session_states() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        update(&mut app, Action::BeginSession);
        assert!(draw(&app, &mut tui).contains("Cooking up some magic..."));

        let epoch = app.session.epoch();
        update(
            &mut app,
            Action::DeckGenerated {
                epoch,
                result: Ok(sample_cards(2)),
            },
        );
        let text = draw(&app, &mut tui);
        assert!(text.contains("word-0"));
        assert!(text.contains("1/2"));
        assert!(text.contains("Daily Conversation • Beginner"));
    }

    #[test]
    fn test_draw_gauge_follows_session_progress() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        update(&mut app, Action::BeginSession);
        let epoch = app.session.epoch();
        update(
            &mut app,
            Action::DeckGenerated {
                epoch,
                result: Ok(sample_cards(2)),
            },
        );
        assert!(!draw(&app, &mut tui).contains('█'));

        update(&mut app, Action::Flip);
        let judgment = app.session.judge(true).unwrap();
        update(&mut app, Action::Advance(judgment.token));
        assert_eq!(app.session.progress(), Some(0.5));

        let text = draw(&app, &mut tui);
        assert!(text.contains("2/2"));
        assert!(text.contains('█'));
    }

    #[test]
    fn test_draw_error_state() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        update(&mut app, Action::BeginSession);
        let epoch = app.session.epoch();
        update(
            &mut app,
            Action::DeckGenerated {
                epoch,
                result: Ok(Vec::new()),
            },
        );

        let text = draw(&app, &mut tui);
        assert!(text.contains("Whoops!"));
        assert!(text.contains("Enter try again"));
    }

    #[test]
    fn test_footer_hint_depends_on_flip() {
        let front = SessionState::Playing {
            cursor: 0,
            is_flipped: false,
        };
        let back = SessionState::Playing {
            cursor: 0,
            is_flipped: true,
        };
        assert!(!footer_hint(&front).contains("know it"));
        assert!(footer_hint(&back).contains("know it"));
    }
}
