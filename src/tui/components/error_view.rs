use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

/// "Whoops!" panel for a failed generation.
pub struct ErrorView<'a> {
    pub message: &'a str,
}

impl Component for ErrorView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(60);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(8)])
            .flex(Flex::Center)
            .areas(column);

        let lines = vec![
            Line::from(Span::styled(
                "Whoops!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(self.message),
            Line::default(),
            Line::from(Span::styled(
                "Try Again (Enter)",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(Block::bordered().border_style(Style::default().fg(Color::Red)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, panel);
    }
}
