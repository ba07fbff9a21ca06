//! # Playing View
//!
//! Progress gauge, the current card, and the judge controls. While a
//! judgment's feedback pause is running the feedback popup sits on top.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};

use crate::core::card::VocabularyCard;
use crate::core::session::Feedback;
use crate::tui::component::Component;
use crate::tui::components::feedback::FeedbackOverlay;
use crate::tui::components::flashcard::FlashcardView;

pub struct PlayingView<'a> {
    pub card: &'a VocabularyCard,
    pub cursor: usize,
    pub total: usize,
    /// Fraction of the deck already behind the cursor.
    pub progress: f64,
    pub is_flipped: bool,
    pub feedback: Option<(Feedback, &'a str)>,
}

impl PlayingView<'_> {
    fn controls_line(&self) -> Line<'static> {
        if self.feedback.is_some() {
            return Line::default();
        }
        if self.is_flipped {
            Line::from(vec![
                Span::styled(
                    "← Still Learning",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("     "),
                Span::styled(
                    "I Know It! →",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else {
            Line::from(Span::styled(
                "Tap space to reveal",
                Style::default().fg(Color::DarkGray),
            ))
        }
    }
}

impl Component for PlayingView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(56);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [gauge_area, _, card_area, _, controls_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Max(16),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(column);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .ratio(self.progress.clamp(0.0, 1.0))
            .label(format!("{}/{}", self.cursor + 1, self.total));
        frame.render_widget(gauge, gauge_area);

        FlashcardView {
            card: self.card,
            is_flipped: self.is_flipped,
        }
        .render(frame, card_area);

        frame.render_widget(
            Paragraph::new(self.controls_line()).alignment(Alignment::Center),
            controls_area,
        );

        if let Some((feedback, message)) = self.feedback {
            FeedbackOverlay { feedback, message }.render(frame, card_area);
        }
    }
}
