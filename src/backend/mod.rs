//! Record-collection backend interface.
//!
//! The lookup core never talks to storage directly. It builds a
//! [`SearchQuery`] from a lookup's searchable fields and hands it to a
//! [`RecordBackend`], which must support an unfiltered load and an
//! OR-predicate filtered load. [`MemoryBackend`](memory::MemoryBackend)
//! is the bundled implementation used by tests and the demo binary.

use std::fmt;

use crate::domain::{Lookup, LookupError, Record};

// ============================================================================
// Module Declarations
// ============================================================================

pub mod memory;

pub use memory::MemoryBackend;

// ============================================================================
// Search Query
// ============================================================================

/// One search term source: a data provider labeled with its field title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProvider {
    data_provider: String,
    alias: String,
}

impl SearchProvider {
    /// The attribute identifier matched against the search text.
    #[must_use]
    pub fn data_provider(&self) -> &str {
        &self.data_provider
    }

    /// Display label of the originating field.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// A filtered-load request: free text plus the fields to match it against.
///
/// A row satisfies the query when the text matches **any** registered
/// provider (logical OR across fields). The exact match semantics
/// (substring, tokenization, case folding) belong to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    providers: Vec<SearchProvider>,
}

impl SearchQuery {
    /// Builds the query for one lookup: every field with
    /// `is_searchable() == true` is registered as a provider, labeled by
    /// its title text. Visibility is ignored — invisible fields still
    /// participate in matching.
    #[must_use]
    pub fn for_lookup(lookup: &Lookup, text: impl Into<String>) -> Self {
        let providers = lookup
            .fields()
            .iter()
            .filter(|field| field.is_searchable())
            .map(|field| SearchProvider {
                data_provider: field.data_provider().to_string(),
                alias: field.title_text().to_string(),
            })
            .collect();
        Self {
            text: text.into(),
            providers,
        }
    }

    /// The search text to match.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Registered term sources, in field order.
    #[must_use]
    pub fn providers(&self) -> &[SearchProvider] {
        &self.providers
    }

    /// Whether the query has no term sources at all.
    ///
    /// A lookup with zero searchable fields yields such a query; it can
    /// match nothing on non-empty text.
    #[must_use]
    pub fn has_no_providers(&self) -> bool {
        self.providers.is_empty()
    }
}

// ============================================================================
// RecordBackend
// ============================================================================

/// Contract the lookup core requires from record-collection storage.
///
/// Implementations expose rows with a stable identity and arbitrary named
/// attributes. Errors from either operation abort the active search and
/// are propagated to the popup caller, never swallowed.
pub trait RecordBackend: fmt::Debug {
    /// Loads every row of the datasource, unfiltered.
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownDatasource`] for an unregistered datasource,
    /// or [`LookupError::Query`] on storage failure.
    fn load_all(&self, datasource: &str) -> Result<Vec<Record>, LookupError>;

    /// Loads the rows matching `query` (OR across its providers).
    ///
    /// Called with non-empty text and at least one provider; the session
    /// short-circuits the other cases itself.
    ///
    /// # Errors
    ///
    /// [`LookupError::UnknownDatasource`] for an unregistered datasource,
    /// or [`LookupError::Query`] on storage failure.
    fn query(&self, datasource: &str, query: &SearchQuery) -> Result<Vec<Record>, LookupError>;
}

// ============================================================================
// Tests
// ============================================================================
