//! # Summary Screen
//!
//! End-of-deck results: score headline, tallies, and a scrollable
//! "Let's Review These" list of the cards marked Still Learning.
//!
//! The review list can outgrow the terminal, so it renders through a
//! `tui_scrollview::ScrollView` whose offset persists in `SummaryState`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::card::VocabularyCard;
use crate::core::stats::SessionStats;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryEvent {
    PlayAgain,
}

#[derive(Debug, Default)]
pub struct SummaryState {
    pub scroll_state: ScrollViewState,
}

impl SummaryState {
    pub fn reset(&mut self) {
        self.scroll_state = ScrollViewState::default();
    }
}

impl EventHandler for SummaryState {
    type Event = SummaryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SummaryEvent> {
        match event {
            TuiEvent::Submit | TuiEvent::InputChar('r') => Some(SummaryEvent::PlayAgain),
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

pub fn headline(stats: &SessionStats) -> &'static str {
    if stats.is_great_score() {
        "Amazing Job!"
    } else {
        "Session Complete!"
    }
}

fn review_lines(card: &VocabularyCard, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            card.word.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", card.pronunciation),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  {}", card.part_of_speech),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    ])];
    lines.extend(
        textwrap::wrap(&card.definition, width.max(1))
            .into_iter()
            .map(|l| Line::from(l.into_owned())),
    );
    let example_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    lines.extend(
        textwrap::wrap(&format!("\"{}\"", card.example), width.max(1))
            .into_iter()
            .map(|l| Line::from(Span::styled(l.into_owned(), example_style))),
    );
    lines.push(Line::default());
    lines
}

pub struct SummaryView<'a> {
    pub stats: &'a SessionStats,
    pub state: &'a mut SummaryState,
}

impl Component for SummaryView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(64);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        let has_review = !self.stats.incorrect_words.is_empty();
        let [header_area, review_area, play_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Min(if has_review { 3 } else { 0 }),
            Constraint::Length(1),
        ])
        .areas(column);

        let pct = self.stats.score_percentage().unwrap_or(0);
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                headline(self.stats),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{pct}%"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "You mastered {} new words today!",
                self.stats.correct
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(
                    format!("Super Stars: {}", self.stats.correct),
                    Style::default().fg(Color::Green),
                ),
                Span::raw("    "),
                Span::styled(
                    format!("Keep Practicing: {}", self.stats.incorrect),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, header_area);

        if has_review {
            let block = Block::bordered()
                .title("Let's Review These")
                .border_style(Style::default().fg(Color::DarkGray));
            let inner = block.inner(review_area);
            frame.render_widget(block, review_area);

            // One column reserved for the scrollbar
            let content_width = inner.width.saturating_sub(1);
            let rows: Vec<Vec<Line>> = self
                .stats
                .incorrect_words
                .iter()
                .map(|card| review_lines(card, content_width as usize))
                .collect();
            let total_height: u16 = rows.iter().map(|r| r.len() as u16).sum();

            let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
                .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
                .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
            let mut y: u16 = 0;
            for row in rows {
                let height = row.len() as u16;
                scroll_view.render_widget(
                    Paragraph::new(row),
                    Rect::new(0, y, content_width, height),
                );
                y += height;
            }
            frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
        }

        let play = Paragraph::new(Line::from(vec![
            Span::styled(
                "Play Again",
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
    use crate::test_support::sample_cards;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn stats_with(known: &[bool]) -> SessionStats {
        let cards = sample_cards(known.len());
        let mut stats = SessionStats::for_deck(known.len());
        for (card, known) in cards.iter().zip(known) {
            stats.record(card, *known);
        }
        stats
    }

    fn render(stats: &SessionStats, state: &mut SummaryState) -> String {
        let backend = TestBackend::new(70, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SummaryView { stats, state }.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_headline_threshold() {
        assert_eq!(headline(&stats_with(&[true, true, true, false])), "Amazing Job!");
        assert_eq!(headline(&stats_with(&[true, false])), "Session Complete!");
        let exactly_seventy = [true, true, true, true, true, true, true, false, false, false];
        assert_eq!(headline(&stats_with(&exactly_seventy)), "Amazing Job!");
    }

    #[test]
    fn test_summary_lists_missed_words() {
        let stats = stats_with(&[true, false, true]);
        let mut state = SummaryState::default();
        let text = render(&stats, &mut state);

        assert!(text.contains("67%"));
        assert!(text.contains("Super Stars: 2"));
        assert!(text.contains("Keep Practicing: 1"));
        assert!(text.contains("Let's Review These"));
        assert!(text.contains("word-1"));
        assert!(!text.contains("word-0"));
        assert!(text.contains("Play Again"));
    }

    #[test]
    fn test_perfect_score_has_no_review_list() {
        let stats = stats_with(&[true, true]);
        let mut state = SummaryState::default();
        let text = render(&stats, &mut state);

        assert!(text.contains("Amazing Job!"));
        assert!(text.contains("100%"));
        assert!(!text.contains("Let's Review These"));
    }

    #[test]
    fn test_play_again_keys() {
        let mut state = SummaryState::default();
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(SummaryEvent::PlayAgain));
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r')),
            Some(SummaryEvent::PlayAgain)
        );
        assert_eq!(state.handle_event(&TuiEvent::ScrollDown), None);
    }
}
