//! UI dimension constants for the lookup popup.

// ============================================================================
// UI Dimension Constants
// ============================================================================

/// Default popup height (in rows) when the caller does not pass one.
///
/// Covers the input line, its border, and roughly a dozen candidate rows.
pub const DEFAULT_POPUP_HEIGHT: u16 = 16;

/// Height of the search input area including its border (in rows).
pub const INPUT_HEIGHT: u16 = 3;

/// Height of the key-hint footer line (in rows).
pub const FOOTER_HEIGHT: u16 = 1;

/// Minimum popup width the layout will shrink to.
pub const MIN_POPUP_WIDTH: u16 = 20;
