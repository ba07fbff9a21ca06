//! # TitleBar Component
//!
//! Top status bar: app name, the chosen topic and level, and transient status.
//!
//! TitleBar is purely presentational. All three props come from core state:
//! - `topic_line`: "Travel & Adventure • Beginner", hidden on the start screen
//! - `status_message`: e.g. "Using gemini" or the last generation error
//!
//! Formatting priority, so the most useful text survives narrow terminals:
//!
//! 1. `"LingoFlash | Food & Dining • Expert | Using gemini"`
//! 2. `"LingoFlash | Food & Dining • Expert"`
//! 3. `"LingoFlash"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = "LingoFlash";

pub struct TitleBar {
    pub topic_line: Option<String>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(topic_line: Option<String>, status_message: String) -> Self {
        Self {
            topic_line,
            status_message,
        }
    }
}

impl TitleBar {
    /// Segments after the app name, dropping the status and then the
    /// topic until the line fits in `width` columns.
    fn segments(&self, width: usize) -> Vec<(&str, Color)> {
        let mut segments = Vec::new();
        if let Some(topic_line) = &self.topic_line {
            segments.push((topic_line.as_str(), Color::Cyan));
        }
        if !self.status_message.is_empty() {
            segments.push((self.status_message.as_str(), Color::DarkGray));
        }

        let line_width = |segments: &[(&str, Color)]| {
            APP_TITLE.width() + segments.iter().map(|(s, _)| s.width() + 3).sum::<usize>()
        };
        while !segments.is_empty() && line_width(&segments) > width {
            segments.pop();
        }
        segments
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )];

        for (text, color) in self.segments(area.width as usize) {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(text.to_string(), Style::default().fg(color)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(title_bar: &mut TitleBar) -> String {
        render_at_width(title_bar, 80)
    }

    fn render_at_width(title_bar: &mut TitleBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
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
    fn test_title_bar_with_topic_and_status() {
        let mut title_bar = TitleBar::new(
            Some("Food & Dining • Expert".to_string()),
            "Using gemini".to_string(),
        );
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("LingoFlash"));
        assert!(text.contains("Food & Dining • Expert"));
        assert!(text.contains("Using gemini"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(None, String::new());
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("LingoFlash"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_status_without_topic() {
        let mut title_bar = TitleBar::new(None, "HTTP 401".to_string());
        let text = render_to_text(&mut title_bar);

        assert!(text.contains("LingoFlash | HTTP 401"));
    }

    #[test]
    fn test_title_bar_drops_segments_when_narrow() {
        let mut title_bar = TitleBar::new(
            Some("Food & Dining • Expert".to_string()),
            "Using gemini".to_string(),
        );

        // "LingoFlash | Food & Dining • Expert" is 35 columns
        let text = render_at_width(&mut title_bar, 40);
        assert!(text.contains("Food & Dining • Expert"));
        assert!(!text.contains("Using gemini"));

        let text = render_at_width(&mut title_bar, 20);
        assert!(text.starts_with("LingoFlash"));
        assert!(!text.contains('|'));
    }
}
