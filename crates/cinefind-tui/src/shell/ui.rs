//! TUI rendering logic for the application shell.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{ResultView, ShellState};
use crate::card::{CARD_HEIGHT, CARD_WIDTH, draw_card};
use crate::search_input::draw_search_input;

/// Text shown while a fetch is in flight.
pub const LOADING_TEXT: &str = "Loading....";

/// Draws the shell. Returns the number of card columns for grid navigation.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &ShellState) -> usize {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(5),    // results
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_search_input(frame, chunks[0], &state.query);
    let columns = draw_results(frame, chunks[1], state);
    draw_footer(frame, chunks[2]);

    columns
}

/// Number of cards that fit side by side in `width` cells.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

/// Draws the result section: loading text, error, or the card grid.
#[allow(clippy::indexing_slicing)]
fn draw_results(frame: &mut Frame, area: Rect, state: &ShellState) -> usize {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ALL MOVIES AVAILABLE ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = grid_columns(inner.width);

    match state.view() {
        ResultView::Loading => {
            let loading = Paragraph::new(LOADING_TEXT).style(Style::default().fg(Color::Green));
            frame.render_widget(loading, inner);
        }
        ResultView::Error(message) => {
            let error = Paragraph::new(message).style(Style::default().fg(Color::Red));
            frame.render_widget(error, inner);
        }
        ResultView::Results(_) => {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(inner);

            let count = Paragraph::new(Line::from(Span::styled(
                state.result_count_label(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(count, sections[0]);
            draw_grid(frame, sections[1], state, columns);
        }
    }

    columns
}

/// Lays cards out row by row, scrolled so the selected card stays visible.
#[allow(clippy::arithmetic_side_effects)]
fn draw_grid(frame: &mut Frame, area: Rect, state: &ShellState, columns: usize) {
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let selected_row = state.selected / columns;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    for (index, card) in state.cards().iter().enumerate() {
        let row = index / columns;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let (Ok(col), Ok(row_offset)) = (
            u16::try_from(index % columns),
            u16::try_from(row - first_row),
        ) else {
            continue;
        };
        let cell = Rect {
            x: area.x + col * CARD_WIDTH,
            y: area.y + row_offset * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        };
        draw_card(frame, cell.intersection(area), card, index == state.selected);
    }
}

/// Draws the key binding footer.
fn draw_footer(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(Color::Yellow);
    let help = Line::from(vec![
        Span::styled("type", key_style),
        Span::raw(" search  "),
        Span::styled("Ctrl-U", key_style),
        Span::raw(" clear  "),
        Span::styled("\u{2190}\u{2191}\u{2192}\u{2193}", key_style),
        Span::raw(" select  "),
        Span::styled("Enter", key_style),
        Span::raw(" open in browser  "),
        Span::styled("Esc", key_style),
        Span::raw(" quit"),
    ]);
    let footer = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
