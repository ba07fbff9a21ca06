//! # Feedback Overlay
//!
//! The short celebratory (or encouraging) popup shown between judging a
//! card and moving to the next one.

use rand::Rng;
use rand::seq::SliceRandom;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::session::Feedback;
use crate::tui::component::Component;

pub const POSITIVE_MESSAGES: [&str; 8] = [
    "Spectacular! 🌟",
    "Way to go! 🚀",
    "You're a star! ⭐",
    "Brilliant! 💡",
    "Nailed it! 🔨",
    "Awesome! 🎉",
    "Superb! 🏆",
    "On fire! 🔥",
];

pub const ENCOURAGING_MESSAGES: [&str; 8] = [
    "Nice try! 🌱",
    "Keep growing! 🌿",
    "Learning takes time! 🕰️",
    "You'll get it! 🌈",
    "Practice makes perfect! 📚",
    "Don't give up! 💖",
    "Almost there! 🎯",
    "Stay curious! 🦉",
];

/// Pick a message matching the judgment.
pub fn pick_message<R: Rng + ?Sized>(feedback: Feedback, rng: &mut R) -> &'static str {
    let pool: &[&'static str] = match feedback {
        Feedback::Success => &POSITIVE_MESSAGES,
        Feedback::Missed => &ENCOURAGING_MESSAGES,
    };
    pool.choose(rng).copied().unwrap_or(pool[0])
}

pub struct FeedbackOverlay<'a> {
    pub feedback: Feedback,
    pub message: &'a str,
}

impl Component for FeedbackOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = match self.feedback {
            Feedback::Success => Color::Green,
            Feedback::Missed => Color::Yellow,
        };

        let width = (self.message.width() as u16 + 8).min(area.width);
        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        let paragraph = Paragraph::new(self.message)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}
