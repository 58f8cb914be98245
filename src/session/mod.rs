//! Search session: the runtime state of one open-to-close popup
//! interaction.
//!
//! A [`SearchSession`] is created per `show_popup` invocation from a
//! *clone* of the caller's lookup configuration, so the configuration
//! objects stay reusable and carry no session state. The session owns the
//! ephemeral [`CandidateStore`], re-executes the search on every text
//! edit, and delivers the terminal selection at most once through a
//! [`SelectionHandle`].
//!
//! State machine: `Opening → Open → (select | cancel) → Closed`. Both
//! exits release the store; `select` and `cancel` are no-ops once the
//! session left `Open`, which also debounces rapid repeated user actions.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::backend::{RecordBackend, SearchQuery};
use crate::domain::{Lookup, LookupError, Record};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod store;

pub use store::{CandidateRow, CandidateStore, StoreProvisioner, TransientProvisioner};


// ============================================================================
// Selection
// ============================================================================

/// The terminal result of a session: what the user picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// The selected record.
    pub record: Record,
    /// Originating datasource. `None` for single-datasource sessions,
    /// where it is statically known to the caller.
    pub datasource: Option<String>,
    /// The search text at the time of selection.
    pub search_text: String,
}

/// Resolves the outcome of a popup session.
///
/// Awaiting (or [`blocking_resolve`](Self::blocking_resolve)) yields
/// `Some(Selection)` when the user picked a row and `None` when the popup
/// was dismissed — cancellation resolves instead of leaving the caller
/// pending.
#[derive(Debug)]
pub struct SelectionHandle {
    rx: oneshot::Receiver<Selection>,
}

impl SelectionHandle {
    /// Waits for the session to end.
    pub async fn resolved(self) -> Option<Selection> {
        self.rx.await.ok()
    }

    /// Blocking variant of [`resolved`](Self::resolved) for synchronous
    /// callers. Must not be called from within an async runtime.
    pub fn blocking_resolve(self) -> Option<Selection> {
        self.rx.blocking_recv().ok()
    }
}

// ============================================================================
// Candidates
// ============================================================================

/// One presentable result row, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    record: Record,
    datasource: String,
    header: String,
    display: String,
}

impl Candidate {
    /// The backing record.
    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Datasource identifier of the originating lookup.
    #[must_use]
    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    /// Group header of the originating lookup.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Display column value for this row.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Lifecycle state of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Session allocated, initial search not yet applied.
    #[default]
    Opening,
    /// Popup is up; text edits re-execute the search.
    Open,
    /// Terminal: selected or dismissed, store released.
    Closed,
}

// ============================================================================
// SearchSession
// ============================================================================

/// Ephemeral controller state for one popup invocation.
#[derive(Debug)]
pub struct SearchSession {
    lookups: Vec<Lookup>,
    backend: Arc<dyn RecordBackend>,
    single: bool,
    search_text: String,
    generation: u64,
    candidates: Vec<Candidate>,
    store: CandidateStore,
    select_tx: Option<oneshot::Sender<Selection>>,
    state: SessionState,
}

impl SearchSession {
    /// Opens a session over the given lookups (already cloned from the
    /// caller's configuration) and runs the initial search.
    ///
    /// With `initial_value` present the first search is seeded with it;
    /// otherwise every row loads unfiltered. `single` marks a
    /// single-datasource session, which omits the datasource from the
    /// eventual [`Selection`].
    ///
    /// # Errors
    ///
    /// Propagates backend failures from the initial search; the store is
    /// released and the handle side is never created.
    pub fn open(
        lookups: Vec<Lookup>,
        backend: Arc<dyn RecordBackend>,
        single: bool,
        initial_value: Option<String>,
    ) -> Result<(Self, SelectionHandle), LookupError> {
        Self::open_with_provisioner(lookups, backend, single, initial_value, &TransientProvisioner)
    }

    /// [`open`](Self::open) with an explicit store provisioner.
    pub fn open_with_provisioner(
        lookups: Vec<Lookup>,
        backend: Arc<dyn RecordBackend>,
        single: bool,
        initial_value: Option<String>,
        provisioner: &dyn StoreProvisioner,
    ) -> Result<(Self, SelectionHandle), LookupError> {
        let (tx, rx) = oneshot::channel();
        let mut session = Self {
            lookups,
            backend,
            single,
            search_text: initial_value.unwrap_or_default(),
            generation: 0,
            candidates: Vec::new(),
            store: provisioner.provision(),
            select_tx: Some(tx),
            state: SessionState::Opening,
        };

        if let Err(err) = session.execute_search() {
            session.close();
            return Err(err);
        }
        session.state = SessionState::Open;
        tracing::debug!(
            store = session.store.name(),
            lookups = session.lookups.len(),
            "session opened"
        );

        Ok((session, SelectionHandle { rx }))
    }

    /// Current search text.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Current candidate set, concatenated across lookups in display
    /// order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// The session's ephemeral store.
    #[must_use]
    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session still accepts edits and selections.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Replaces the search text and re-executes the search.
    ///
    /// # Errors
    ///
    /// [`LookupError::SessionClosed`] when the session is not open. A
    /// backend failure closes the session (store released, handle
    /// resolves `None`) and is returned to the caller for display.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Result<(), LookupError> {
        if !self.is_open() {
            return Err(LookupError::SessionClosed);
        }
        self.search_text = text.into();
        self.generation = self.generation.wrapping_add(1);
        if let Err(err) = self.execute_search() {
            self.close();
            return Err(err);
        }
        Ok(())
    }

    /// Selects the candidate at `index`, delivering the selection and
    /// closing the session.
    ///
    /// Returns `false` (and does nothing) when the session is not open or
    /// the index is out of range. The bound handle fires at most once per
    /// session no matter how often this is called.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_open() {
            return false;
        }
        let Some(candidate) = self.candidates.get(index) else {
            return false;
        };

        let selection = Selection {
            record: candidate.record.clone(),
            datasource: (!self.single).then(|| candidate.datasource.clone()),
            search_text: self.search_text.clone(),
        };
        if let Some(tx) = self.select_tx.take() {
            // Receiver may already be gone; the session closes regardless.
            let _ = tx.send(selection);
        }
        self.close();
        true
    }

    /// Dismisses the session without a selection; the bound handle
    /// resolves `None`. No-op when the session already ended.
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        self.close();
    }

    fn close(&mut self) {
        self.select_tx = None;
        self.candidates.clear();
        self.store.release();
        self.state = SessionState::Closed;
    }

    /// Runs the search algorithm over every bound lookup and replaces the
    /// candidate set.
    ///
    /// Empty text loads all rows. Non-empty text queries each lookup's
    /// searchable fields with OR semantics; a lookup with zero searchable
    /// fields contributes zero rows (it does **not** fall back to showing
    /// all). Per-lookup results are concatenated, never interleaved.
    fn execute_search(&mut self) -> Result<(), LookupError> {
        let generation = self.generation;
        let mut candidates = Vec::new();

        for lookup in &self.lookups {
            let rows = if self.search_text.is_empty() {
                self.backend.load_all(lookup.data_source())?
            } else {
                let query = SearchQuery::for_lookup(lookup, self.search_text.clone());
                if query.has_no_providers() {
                    Vec::new()
                } else {
                    self.backend.query(lookup.data_source(), &query)?
                }
            };

            for record in rows {
                let display = display_value(lookup, &record);
                candidates.push(Candidate {
                    datasource: lookup.data_source().to_string(),
                    header: lookup.header().to_string(),
                    display,
                    record,
                });
            }
        }

        // A superseded search must not clobber newer results.
        if generation == self.generation {
            self.store.replace_rows(
                candidates
                    .iter()
                    .map(|c| CandidateRow {
                        id: c.record.id().to_string(),
                        display: c.display.clone(),
                    })
                    .collect(),
            );
            self.candidates = candidates;
        }
        Ok(())
    }
}

/// Display column for a record: the configured display field, else the
/// first visible field with a value, else the record id.
fn display_value(lookup: &Lookup, record: &Record) -> String {
    if let Some(display_field) = lookup.display_field()
        && let Some(text) = record.attribute_text(display_field)
    {
        return text;
    }
    for field in lookup.fields() {
        if field.is_visible()
            && let Some(text) = record.attribute_text(field.data_provider())
        {
            return text;
        }
    }
    record.id().to_string()
}
