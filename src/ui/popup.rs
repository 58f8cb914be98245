//! Lookup popup controller: key handling and rendering for one session.
//!
//! [`LookupPopup`] is the presenter side of a [`SearchSession`]: it owns
//! the session for the popup's lifetime, forwards text edits and
//! row-selection events to it, and draws the anchored popup (input line,
//! grouped candidate list, key hints). The host application keeps running
//! its own event loop and hands key events to [`LookupPopup::handle_key`]
//! until a terminal [`PopupEvent`] comes back.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph},
};

use crate::backend::RecordBackend;
use crate::constants::{FOOTER_HEIGHT, INPUT_HEIGHT};
use crate::domain::{Lookup, LookupError};
use crate::session::{SearchSession, SelectionHandle};
use crate::theme::{GROUP_HEADER_STYLE, MUTED_COLOR, PRIMARY_COLOR, SELECTED_STYLE};
use crate::ui::helpers::{create_input_block, create_popup_block};
use crate::ui::layout::{PopupAnchor, PopupOptions, anchored_popup_area};

// ============================================================================
// Popup Events
// ============================================================================

/// Outcome of feeding one key event to the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// Popup stays open; keep forwarding events and re-rendering.
    Pending,
    /// A row was picked; the session delivered its selection and closed.
    Selected,
    /// The popup was dismissed without a selection.
    Cancelled,
}

// ============================================================================
// LookupPopup
// ============================================================================

/// Modal pick-list popup bound to one search session.
#[derive(Debug)]
pub struct LookupPopup {
    session: SearchSession,
    anchor: PopupAnchor,
    width: Option<u16>,
    height: Option<u16>,
    title: String,
    show_groups: bool,
    selected: usize,
}

impl LookupPopup {
    /// Opens a popup over a single lookup (cloned by the caller).
    pub(crate) fn open_single(
        lookup: Lookup,
        backend: Arc<dyn RecordBackend>,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Result<(Self, SelectionHandle), LookupError> {
        let title = lookup.header().to_string();
        Self::open(vec![lookup], backend, true, anchor, options, title, false)
    }

    /// Opens a popup spanning several lookups, with grouped headers.
    pub(crate) fn open_multi(
        lookups: Vec<Lookup>,
        backend: Arc<dyn RecordBackend>,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Result<(Self, SelectionHandle), LookupError> {
        Self::open(
            lookups,
            backend,
            false,
            anchor,
            options,
            "Lookup".to_string(),
            true,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn open(
        lookups: Vec<Lookup>,
        backend: Arc<dyn RecordBackend>,
        single: bool,
        anchor: PopupAnchor,
        options: PopupOptions,
        title: String,
        show_groups: bool,
    ) -> Result<(Self, SelectionHandle), LookupError> {
        let (session, handle) =
            SearchSession::open(lookups, backend, single, options.initial_value)?;
        Ok((
            Self {
                session,
                anchor,
                width: options.width,
                height: options.height,
                title,
                show_groups,
                selected: 0,
            },
            handle,
        ))
    }

    /// The underlying session (candidates, text, lifecycle state).
    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Index of the highlighted candidate row.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Feeds one key event to the popup.
    ///
    /// Printable characters and backspace edit the search text and
    /// re-execute the search; up/down move the highlight; enter selects
    /// the highlighted row; esc dismisses. Events after the popup closed
    /// are inert.
    ///
    /// # Errors
    ///
    /// A backend failure during re-search closes the session (the
    /// selection handle resolves `None`) and is returned so the host can
    /// surface it instead of leaving a silently hung popup.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<PopupEvent, LookupError> {
        if !self.session.is_open() {
            return Ok(PopupEvent::Pending);
        }

        match key.code {
            KeyCode::Esc => {
                self.session.cancel();
                Ok(PopupEvent::Cancelled)
            }
            KeyCode::Enter => {
                if self.session.select(self.selected) {
                    Ok(PopupEvent::Selected)
                } else {
                    Ok(PopupEvent::Pending)
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Ok(PopupEvent::Pending)
            }
            KeyCode::Down => {
                let max = self.session.candidates().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max);
                Ok(PopupEvent::Pending)
            }
            KeyCode::Backspace => {
                let mut text = self.session.search_text().to_string();
                text.pop();
                self.apply_text(text)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.session.search_text().to_string();
                text.push(c);
                self.apply_text(text)
            }
            _ => Ok(PopupEvent::Pending),
        }
    }

    fn apply_text(&mut self, text: String) -> Result<PopupEvent, LookupError> {
        self.session.set_search_text(text)?;
        self.selected = 0;
        Ok(PopupEvent::Pending)
    }

    /// Renders the popup anchored within the frame.
    ///
    /// Safe on degenerate areas: anything too small to hold the chrome
    /// renders as much as fits, or nothing at all.
    pub fn render(&self, frame: &mut Frame) {
        let popup_area = anchored_popup_area(self.anchor, frame.area(), self.width, self.height);
        if popup_area.width < 4 || popup_area.height < 3 {
            return;
        }

        let popup_block = create_popup_block(&self.title);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(popup_block.clone(), popup_area);
        let inner = popup_block.inner(popup_area);

        // Search input with a cursor marker.
        let input_area = Rect::new(inner.x, inner.y, inner.width, INPUT_HEIGHT.min(inner.height));
        let input_block = create_input_block();
        frame.render_widget(input_block.clone(), input_area);
        let input_text = format!("{}▏", self.session.search_text());
        frame.render_widget(
            Paragraph::new(input_text).style(Style::default().fg(PRIMARY_COLOR)),
            input_block.inner(input_area),
        );

        let list_y = input_area.bottom();
        let footer_y = inner.bottom().saturating_sub(FOOTER_HEIGHT);
        if list_y >= footer_y {
            return;
        }
        let list_area = Rect::new(inner.x, list_y, inner.width, footer_y - list_y);

        if self.session.candidates().is_empty() {
            frame.render_widget(
                Paragraph::new("No matching records")
                    .style(Style::default().fg(MUTED_COLOR))
                    .alignment(Alignment::Center),
                list_area,
            );
        } else {
            frame.render_widget(List::new(self.candidate_items()), list_area);
        }

        let footer = Paragraph::new("↑/↓ Move  Enter: Select  Esc: Cancel")
            .style(Style::default().fg(MUTED_COLOR))
            .alignment(Alignment::Center);
        frame.render_widget(footer, Rect::new(inner.x, footer_y, inner.width, FOOTER_HEIGHT));
    }

    /// List items for the candidate set: group header lines (multi-DS
    /// only) interleaved with candidate rows, highlight on the selected
    /// row.
    fn candidate_items(&self) -> Vec<ListItem<'_>> {
        let mut items = Vec::new();
        let mut last_header: Option<&str> = None;

        for (index, candidate) in self.session.candidates().iter().enumerate() {
            if self.show_groups && last_header != Some(candidate.header()) {
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("── {} ──", candidate.header()),
                    GROUP_HEADER_STYLE,
                ))));
                last_header = Some(candidate.header());
            }

            let is_selected = index == self.selected;
            let marker = if is_selected { "▶ " } else { "  " };
            let style = if is_selected {
                SELECTED_STYLE
            } else {
                Style::default()
            };
            items.push(ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, candidate.display()),
                style,
            ))));
        }
        items
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::domain::{Record, create_multi_ds_lookup};
    use ratatui::{Terminal, backend::TestBackend};

    const PRODUCTS: &str = "db/example_data/products";
    const CUSTOMERS: &str = "db/example_data/customers";

    fn backend() -> Arc<MemoryBackend> {
        let mut backend = MemoryBackend::new();
        let mut chai = Record::new("p1");
        chai.set("productname", "Chai");
        let mut tofu = Record::new("p2");
        tofu.set("productname", "Tofu");
        backend.add_datasource(PRODUCTS, vec![chai, tofu]);

        let mut horn = Record::new("c1");
        horn.set("companyname", "Around the Horn");
        backend.add_datasource(CUSTOMERS, vec![horn]);
        Arc::new(backend)
    }

    fn product_lookup() -> Lookup {
        let mut lookup = Lookup::new(PRODUCTS);
        lookup.add_field("productname").set_title_text("Product");
        lookup.set_display_field("productname");
        lookup
    }

    fn open_popup(options: PopupOptions) -> (LookupPopup, SelectionHandle) {
        product_lookup()
            .show_popup(
                backend(),
                PopupAnchor::new(Rect::new(5, 2, 40, 1)),
                options,
            )
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_filters_candidates() {
        let (mut popup, _handle) = open_popup(PopupOptions::default());
        assert_eq!(popup.session().candidates().len(), 2);

        for c in "tof".chars() {
            assert_eq!(
                popup.handle_key(key(KeyCode::Char(c))).unwrap(),
                PopupEvent::Pending
            );
        }
        assert_eq!(popup.session().search_text(), "tof");
        assert_eq!(popup.session().candidates().len(), 1);
        assert_eq!(popup.session().candidates()[0].display(), "Tofu");

        popup.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(popup.session().search_text(), "to");
    }

    #[test]
    fn test_enter_selects_highlighted_row() {
        let (mut popup, handle) = open_popup(PopupOptions::default());
        popup.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(popup.selected_index(), 1);

        let event = popup.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(event, PopupEvent::Selected);

        let selection = handle.blocking_resolve().expect("selection");
        assert_eq!(selection.record.id(), "p2");
        assert_eq!(selection.datasource, None);
    }

    #[test]
    fn test_esc_cancels_and_later_keys_are_inert() {
        let (mut popup, handle) = open_popup(PopupOptions::default());
        assert_eq!(
            popup.handle_key(key(KeyCode::Esc)).unwrap(),
            PopupEvent::Cancelled
        );
        // Rapid repeats after dismissal do nothing.
        assert_eq!(
            popup.handle_key(key(KeyCode::Enter)).unwrap(),
            PopupEvent::Pending
        );
        assert!(handle.blocking_resolve().is_none());
    }

    #[test]
    fn test_selection_resets_on_new_text() {
        let (mut popup, _handle) = open_popup(PopupOptions::default());
        popup.handle_key(key(KeyCode::Down)).unwrap();
        popup.handle_key(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(popup.selected_index(), 0);
    }

    #[test]
    fn test_popup_renders_with_and_without_matches() {
        let (mut popup, _handle) = open_popup(PopupOptions::with_initial_value("chai"));
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| popup.render(frame)).unwrap();
        assert!(!terminal.backend().buffer().area().is_empty());

        popup.handle_key(key(KeyCode::Char('z'))).unwrap();
        assert!(popup.session().candidates().is_empty());
        terminal.draw(|frame| popup.render(frame)).unwrap();
    }

    #[test]
    fn test_multi_ds_popup_renders_group_headers() {
        let mut multi = create_multi_ds_lookup([PRODUCTS, CUSTOMERS]);
        multi
            .lookup_mut(PRODUCTS)
            .unwrap()
            .add_field("productname");
        multi
            .lookup_mut(CUSTOMERS)
            .unwrap()
            .add_field("companyname");

        let (popup, _handle) = multi
            .show_popup(
                backend(),
                PopupAnchor::new(Rect::new(0, 0, 60, 1)),
                PopupOptions::default(),
            )
            .unwrap();

        let test_backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(test_backend).unwrap();
        terminal.draw(|frame| popup.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("products"));
        assert!(content.contains("customers"));
    }

    #[test]
    fn test_render_survives_tiny_areas() {
        let (popup, _handle) = open_popup(PopupOptions::default());
        let test_backend = TestBackend::new(3, 2);
        let mut terminal = Terminal::new(test_backend).unwrap();
        terminal.draw(|frame| popup.render(frame)).unwrap();
    }
}
