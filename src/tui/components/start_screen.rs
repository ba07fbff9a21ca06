//! # Start Screen
//!
//! Topic and level pickers plus the "Let's Play!" prompt.
//!
//! `StartScreenState` only tracks which picker has focus; the chosen values
//! live in the core `Session` and arrive as props. Key handling emits
//! `StartEvent`s which the event loop turns into `Action`s.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::topic::{Difficulty, Topic};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const HEADLINE: &str = "Fun with Flashcards";
const TAGLINE: &str = "Learn new words in a fun, stress-free way! Pick a topic you love and let our AI create the perfect deck for you.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartField {
    #[default]
    Topic,
    Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartEvent {
    CycleTopic { forward: bool },
    CycleDifficulty { forward: bool },
    Begin,
}

#[derive(Debug, Default)]
pub struct StartScreenState {
    pub focus: StartField,
}

impl EventHandler for StartScreenState {
    type Event = StartEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<StartEvent> {
        match event {
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.focus = match self.focus {
                    StartField::Topic => StartField::Difficulty,
                    StartField::Difficulty => StartField::Topic,
                };
                None
            }
            TuiEvent::CursorLeft | TuiEvent::CursorRight => {
                let forward = matches!(event, TuiEvent::CursorRight);
                Some(match self.focus {
                    StartField::Topic => StartEvent::CycleTopic { forward },
                    StartField::Difficulty => StartEvent::CycleDifficulty { forward },
                })
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(StartEvent::Begin),
            _ => None,
        }
    }
}

pub struct StartScreen<'a> {
    pub state: &'a StartScreenState,
    pub topic: Topic,
    pub difficulty: Difficulty,
}

fn picker_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::bordered()
        .title(title)
        .border_style(border_style)
        .title_style(border_style.add_modifier(Modifier::BOLD))
}

fn option_span(label: &str, selected: bool) -> Span<'_> {
    if selected {
        Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
    }
}

impl Component for StartScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(72);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        let topic_rows = Topic::ALL.len().div_ceil(2) as u16;
        let [headline_area, _, topic_area, difficulty_area, _, play_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(topic_rows + 2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(column);

        let headline = Paragraph::new(vec![
            Line::from(Span::styled(
                HEADLINE,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(headline, headline_area);

        // Topics: two per row
        let topic_lines: Vec<Line> = Topic::ALL
            .chunks(2)
            .map(|pair| {
                Line::from(
                    pair.iter()
                        .map(|t| option_span(t.label(), *t == self.topic))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let topics = Paragraph::new(topic_lines)
            .alignment(Alignment::Center)
            .block(picker_block(
                "Pick a Topic",
                self.state.focus == StartField::Topic,
            ));
        frame.render_widget(topics, topic_area);

        let levels = Paragraph::new(Line::from(
            Difficulty::ALL
                .iter()
                .map(|d| option_span(d.label(), *d == self.difficulty))
                .collect::<Vec<_>>(),
        ))
        .alignment(Alignment::Center)
        .block(picker_block(
            "Your Level",
            self.state.focus == StartField::Difficulty,
        ));
        frame.render_widget(levels, difficulty_area);

        let play = Paragraph::new(Line::from(vec![
            Span::styled(
                "Let's Play!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (Enter)", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(play, play_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_vertical_keys_toggle_focus() {
        let mut state = StartScreenState::default();
        assert_eq!(state.focus, StartField::Topic);

        assert_eq!(state.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(state.focus, StartField::Difficulty);

        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.focus, StartField::Topic);
    }

    #[test]
    fn test_horizontal_keys_cycle_focused_field() {
        let mut state = StartScreenState::default();
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(StartEvent::CycleTopic { forward: true })
        );

        state.focus = StartField::Difficulty;
        assert_eq!(
            state.handle_event(&TuiEvent::CursorLeft),
            Some(StartEvent::CycleDifficulty { forward: false })
        );
    }

    #[test]
    fn test_submit_begins() {
        let mut state = StartScreenState::default();
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(StartEvent::Begin));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_render_lists_choices() {
        let backend = TestBackend::new(90, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let state = StartScreenState::default();

        terminal
            .draw(|f| {
                StartScreen {
                    state: &state,
                    topic: Topic::FoodDining,
                    difficulty: Difficulty::Advanced,
                }
                .render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains(HEADLINE));
        assert!(text.contains("Pick a Topic"));
        assert!(text.contains("Your Level"));
        assert!(text.contains("Expert"));
        assert!(text.contains("Let's Play!"));
    }
}
