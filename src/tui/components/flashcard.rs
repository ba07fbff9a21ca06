//! # Flashcard Component
//!
//! Renders one face of a `VocabularyCard` inside a rounded border.
//!
//! Front: the word, its part of speech and pronunciation.
//! Back: the definition and a quoted example sentence.
//!
//! Text is wrapped with `textwrap` ahead of time so the card can be centered
//! vertically by its real line count rather than by guesswork.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::card::VocabularyCard;
use crate::tui::component::Component;

pub struct FlashcardView<'a> {
    pub card: &'a VocabularyCard,
    pub is_flipped: bool,
}

fn label_line(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.to_uppercase(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn wrapped(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| Line::from(Span::styled(line.into_owned(), style)))
        .collect()
}

/// Lines for one card face, wrapped to `width` columns.
pub fn card_face_lines(card: &VocabularyCard, is_flipped: bool, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if is_flipped {
        lines.push(label_line("Definition", Color::LightMagenta));
        lines.push(Line::default());
        lines.extend(wrapped(
            &card.definition,
            width,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::default());
        lines.push(label_line("Example", Color::LightMagenta));
        lines.extend(wrapped(
            &format!("\"{}\"", card.example),
            width,
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    } else {
        lines.push(label_line("Word", Color::LightBlue));
        lines.push(Line::default());
        lines.extend(wrapped(
            &card.word,
            width,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled(
                card.part_of_speech.clone(),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::ITALIC),
            ),
            Span::styled(" • ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.pronunciation.clone(), Style::default().fg(Color::Gray)),
        ]));
    }
    lines
}

impl Component for FlashcardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_color = if self.is_flipped {
            Color::Magenta
        } else {
            Color::Blue
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column of padding on each side
        let text_width = inner.width.saturating_sub(2) as usize;
        let lines = card_face_lines(self.card, self.is_flipped, text_width);
        let height = (lines.len() as u16).min(inner.height);

        let [text_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
    }
}
