//! Pop-up pick-list search over one or more record collections.
//!
//! Callers describe *what* to search declaratively — a [`Lookup`] per
//! datasource, each with ordered [`LookupField`]s, a display field, and a
//! group header — then open a popup session against a [`RecordBackend`].
//! The session filters candidates as the user types (OR across searchable
//! fields), concatenates multi-datasource results with per-group headers,
//! and resolves the single selection through a [`SelectionHandle`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use picklist::{MemoryBackend, PopupAnchor, PopupOptions, create_lookup};
//! use ratatui::layout::Rect;
//!
//! let mut products = create_lookup("db/example_data/products");
//! products.add_field("productname").set_title_text("Product");
//! products.set_display_field("productname");
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let (mut popup, handle) = products.show_popup(
//!     backend,
//!     PopupAnchor::new(Rect::new(0, 0, 40, 1)),
//!     PopupOptions::default(),
//! )?;
//! // feed popup.handle_key(..) / popup.render(..) from the event loop,
//! // then resolve the outcome:
//! // let picked = handle.blocking_resolve();
//! # Ok::<(), picklist::LookupError>(())
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod backend;
pub mod constants;
pub mod domain;
pub mod session;
pub mod theme;
pub mod tui;
pub mod ui;

// ============================================================================
// Re-exports
// ============================================================================

pub use backend::{MemoryBackend, RecordBackend, SearchProvider, SearchQuery};
pub use domain::{
    Lookup, LookupError, LookupField, MultiLookup, Record, create_lookup, create_multi_ds_lookup,
};
pub use session::{
    Candidate, CandidateRow, CandidateStore, SearchSession, Selection, SelectionHandle,
    SessionState, StoreProvisioner, TransientProvisioner,
};
pub use ui::{LookupPopup, PopupAnchor, PopupEvent, PopupOptions};
