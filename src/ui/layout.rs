//! Geometry for popups anchored to a target component.

use ratatui::layout::Rect;

use crate::constants::{DEFAULT_POPUP_HEIGHT, MIN_POPUP_WIDTH};

// ============================================================================
// Anchor & Options
// ============================================================================

/// The component rectangle a popup opens relative to.
///
/// The popup is placed directly below the anchor when there is room,
/// otherwise above it, and its width defaults to the anchor's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupAnchor {
    /// Target component area in screen coordinates.
    pub area: Rect,
}

impl PopupAnchor {
    /// Anchors to the given rectangle.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self { area }
    }
}

impl From<Rect> for PopupAnchor {
    fn from(area: Rect) -> Self {
        Self::new(area)
    }
}

/// Caller-tunable popup parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupOptions {
    /// Popup width; defaults to the anchor width when `None`.
    pub width: Option<u16>,
    /// Popup height; defaults to [`DEFAULT_POPUP_HEIGHT`] when `None`.
    pub height: Option<u16>,
    /// Seed text for the initial search.
    pub initial_value: Option<String>,
}

impl PopupOptions {
    /// Options with an initial search value and default geometry.
    #[must_use]
    pub fn with_initial_value(value: impl Into<String>) -> Self {
        Self {
            initial_value: Some(value.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Computes the popup rectangle for an anchor within the screen area.
///
/// Width falls back to the anchor width, height to the default constant;
/// both are clamped so the popup never leaves `screen`. Degenerate
/// screens yield a zero-size rect, which renders as nothing.
#[must_use]
pub fn anchored_popup_area(
    anchor: PopupAnchor,
    screen: Rect,
    width: Option<u16>,
    height: Option<u16>,
) -> Rect {
    if screen.width == 0 || screen.height == 0 {
        return Rect::new(screen.x, screen.y, 0, 0);
    }

    let width = width
        .unwrap_or(anchor.area.width)
        .clamp(MIN_POPUP_WIDTH.min(screen.width), screen.width);
    let height = height.unwrap_or(DEFAULT_POPUP_HEIGHT).min(screen.height);

    let x = anchor
        .area
        .x
        .min(screen.right().saturating_sub(width))
        .max(screen.x);

    // Below the anchor when it fits, above otherwise, clamped on screen.
    let below = anchor.area.bottom();
    let y = if below + height <= screen.bottom() {
        below
    } else {
        anchor
            .area
            .y
            .saturating_sub(height)
            .max(screen.y)
            .min(screen.bottom().saturating_sub(height))
    };

    Rect::new(x, y, width, height)
}

// ============================================================================
// Tests
// ============================================================================
