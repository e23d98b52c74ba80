//! Controlled single-line search input.
//!
//! Holds no state: the displayed text is always the owner's query, and every
//! edit is reported back as the new full string.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Placeholder shown while the query is empty.
pub const PLACEHOLDER: &str = "search through thousands of movies";

/// Applies an edit key to the current text.
///
/// Returns the new full text for keys that change it, `None` otherwise.
#[must_use]
pub fn apply_key(current: &str, key: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    match key {
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            (!current.is_empty()).then(String::new)
        }
        KeyCode::Char(c)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let mut next = String::with_capacity(current.len().saturating_add(c.len_utf8()));
            next.push_str(current);
            next.push(c);
            Some(next)
        }
        KeyCode::Backspace => {
            let mut chars = current.chars();
            chars.next_back()?;
            Some(String::from(chars.as_str()))
        }
        _ => None,
    }
}

/// Draws the search input with the owner's query.
pub fn draw_search_input(frame: &mut Frame, area: Rect, query: &str) {
    let cursor = Span::styled(
        "_",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::SLOW_BLINK),
    );

    let line = if query.is_empty() {
        Line::from(vec![
            cursor,
            Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        Line::from(vec![Span::raw(query), cursor])
    };

    let input = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Find Movies You'll Enjoy Without the Hassle "),
    );
    frame.render_widget(input, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_char_appends() {
        // Arrange & Act
        let next = apply_key("bat", KeyCode::Char('m'), KeyModifiers::NONE);

        // Assert
        assert_eq!(next.as_deref(), Some("batm"));
    }

    #[test]
    fn test_shifted_char_appends() {
        // Arrange & Act
        let next = apply_key("", KeyCode::Char('B'), KeyModifiers::SHIFT);

        // Assert
        assert_eq!(next.as_deref(), Some("B"));
    }

    #[test]
    fn test_backspace_removes_last_char() {
        // Arrange & Act
        let next = apply_key("すずめ", KeyCode::Backspace, KeyModifiers::NONE);

        // Assert
        assert_eq!(next.as_deref(), Some("すず"));
    }

    #[test]
    fn test_backspace_on_empty_is_no_change() {
        // Arrange & Act
        let next = apply_key("", KeyCode::Backspace, KeyModifiers::NONE);

        // Assert
        assert!(next.is_none());
    }

    #[test]
    fn test_ctrl_u_clears() {
        // Arrange & Act
        let next = apply_key("batman", KeyCode::Char('u'), KeyModifiers::CONTROL);

        // Assert
        assert_eq!(next.as_deref(), Some(""));
    }

    #[test]
    fn test_control_chords_are_ignored() {
        // Arrange & Act
        let next = apply_key("batman", KeyCode::Char('c'), KeyModifiers::CONTROL);

        // Assert
        assert!(next.is_none());
    }

    #[test]
    fn test_navigation_keys_are_ignored() {
        // Arrange & Act
        let next = apply_key("batman", KeyCode::Left, KeyModifiers::NONE);

        // Assert
        assert!(next.is_none());
    }
}
