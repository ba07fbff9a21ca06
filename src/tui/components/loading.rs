//! # Loading View
//!
//! Spinner shown while the deck generator works.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::topic::Topic;
use crate::tui::component::Component;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView {
    pub topic: Topic,
    pub spinner_frame: usize,
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        let lines = vec![
            Line::from(Span::styled(
                spinner,
                Style::default().fg(Color::Magenta),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Cooking up some magic...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Finding fun words for {}!", self.topic.label()),
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Esc to cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }
}
