//! Popup presenter for lookup search sessions.
//!
//! The core never renders on its own; this module is the bundled
//! ratatui/crossterm presenter. It forwards text edits and row-selection
//! events to the session and draws the anchored popup overlay.

// ============================================================================
// Module Declarations
// ============================================================================

pub mod helpers;
pub mod layout;
pub mod popup;

// ============================================================================
// Re-exports
// ============================================================================

pub use layout::{PopupAnchor, PopupOptions, anchored_popup_area};
pub use popup::{LookupPopup, PopupEvent};
