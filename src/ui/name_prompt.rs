//! Player name entry shown before a score is submitted.

use crate::core::constants::MAX_PLAYER_NAME_LEN;
use crate::leaderboard::validate_player_name;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrompt {
    pub name_input: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
    pub validation_error: Option<String>,
}

impl Default for NamePrompt {
    fn default() -> Self {
        Self::with_name("")
    }
}

impl NamePrompt {
    pub fn with_name(name: &str) -> Self {
        let mut prompt = Self {
            name_input: name.to_string(),
            cursor_position: name.chars().count(),
            validation_error: None,
        };
        if !name.is_empty() {
            prompt.validate();
        }
        prompt
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, score: u32) {
        let width = 40u16.min(area.width);
        let height = 11u16.min(area.height);
        let modal = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );
        f.render_widget(Clear, modal);

        let block = Block::default()
            .title(" Submit Score ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(modal);
        f.render_widget(block, modal);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Label
                Constraint::Length(3), // Input field
                Constraint::Length(1), // Validation
                Constraint::Min(0),
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        let score_line = Paragraph::new(Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(score_line, chunks[0]);

        f.render_widget(Paragraph::new("Player name:"), chunks[2]);

        let input_widget = Paragraph::new(self.input_with_cursor())
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, chunks[3]);

        let validation_text = if let Some(error) = &self.validation_error {
            Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else {
            Line::from(Span::styled(
                format!("1-{} characters", MAX_PLAYER_NAME_LEN),
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(validation_text), chunks[4]);

        let controls = Paragraph::new("[Enter] Submit   [Esc] Cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(controls, chunks[6]);
    }

    fn input_with_cursor(&self) -> String {
        let mut text: String = self.name_input.chars().take(self.cursor_position).collect();
        text.push('_');
        text.extend(self.name_input.chars().skip(self.cursor_position));
        text
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.name_input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.name_input.len())
    }

    pub fn handle_char_input(&mut self, c: char) {
        if c.is_control() || self.name_input.chars().count() >= MAX_PLAYER_NAME_LEN {
            return;
        }
        let at = self.byte_index(self.cursor_position);
        self.name_input.insert(at, c);
        self.cursor_position += 1;
        self.validate();
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            let at = self.byte_index(self.cursor_position - 1);
            self.name_input.remove(at);
            self.cursor_position -= 1;
            self.validate();
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.name_input.chars().count());
    }

    pub fn validate(&mut self) {
        self.validation_error = validate_player_name(&self.name_input).err();
    }

    /// The trimmed name if it passes validation.
    pub fn accepted_name(&mut self) -> Option<String> {
        match validate_player_name(&self.name_input) {
            Ok(name) => Some(name),
            Err(e) => {
                self.validation_error = Some(e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_backspace() {
        let mut prompt = NamePrompt::default();
        for c in "Ada".chars() {
            prompt.handle_char_input(c);
        }
        assert_eq!(prompt.name_input, "Ada");
        assert_eq!(prompt.cursor_position, 3);

        prompt.handle_backspace();
        assert_eq!(prompt.name_input, "Ad");
        assert_eq!(prompt.cursor_position, 2);
    }

    #[test]
    fn test_insert_in_middle_with_multibyte() {
        let mut prompt = NamePrompt::with_name("Zoë");
        prompt.move_cursor_left();
        prompt.handle_char_input('x');
        assert_eq!(prompt.name_input, "Zoxë");
        assert_eq!(prompt.input_with_cursor(), "Zox_ë");
    }

    #[test]
    fn test_input_capped_at_max_len() {
        let mut prompt = NamePrompt::default();
        for _ in 0..(MAX_PLAYER_NAME_LEN + 5) {
            prompt.handle_char_input('a');
        }
        assert_eq!(prompt.name_input.chars().count(), MAX_PLAYER_NAME_LEN);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut prompt = NamePrompt::with_name("   ");
        assert!(prompt.accepted_name().is_none());
        assert!(prompt.validation_error.is_some());
    }

    #[test]
    fn test_accepted_name_is_trimmed() {
        let mut prompt = NamePrompt::with_name("  Grace ");
        assert_eq!(prompt.accepted_name().as_deref(), Some("Grace"));
    }

    #[test]
    fn test_prefill_places_cursor_at_end() {
        let prompt = NamePrompt::with_name("Linus");
        assert_eq!(prompt.cursor_position, 5);
        assert!(prompt.validation_error.is_none());
    }
}
