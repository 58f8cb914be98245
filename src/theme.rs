//! Styling constants for the lookup popup.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Color Constants
// ============================================================================

/// Primary accent color - input cursor and highlights.
pub const PRIMARY_COLOR: Color = Color::Cyan;

/// Group header color.
pub const HEADER_COLOR: Color = Color::Magenta;

/// Muted text color - hints and placeholders.
pub const MUTED_COLOR: Color = Color::Gray;

/// Error indicator color.
pub const ERROR_COLOR: Color = Color::Red;

// ============================================================================
// Style Constants
// ============================================================================

/// Default border style for the popup block.
pub const BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the highlighted candidate row.
pub const SELECTED_STYLE: Style = Style::new()
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

/// Style for group header lines.
pub const GROUP_HEADER_STYLE: Style = Style::new()
    .fg(HEADER_COLOR)
    .add_modifier(Modifier::BOLD);
