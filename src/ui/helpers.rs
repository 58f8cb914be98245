//! Reusable styled widget helpers for the popup.

use ratatui::{
    layout::Alignment,
    symbols::border,
    widgets::{Block, Borders},
};

use crate::theme::BORDER_STYLE;

// ============================================================================
// Border Block Helpers
// ============================================================================

/// Creates the outer popup block with a centered title.
#[must_use]
pub fn create_popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
}

/// Creates the bordered search-input block.
#[must_use]
pub fn create_input_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
        .title(" Search ")
        .title_alignment(Alignment::Left)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    #[test]
    fn test_blocks_render() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(create_popup_block("Lookup"), Rect::new(0, 0, 40, 6));
                frame.render_widget(create_input_block(), Rect::new(1, 6, 38, 3));
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert!(!buffer.area().is_empty());
    }
}
