//! Aggregation of lookups for a cross-datasource search session.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::backend::RecordBackend;
use crate::domain::{Lookup, LookupError};
use crate::session::SelectionHandle;
use crate::ui::{LookupPopup, PopupAnchor, PopupOptions};

// ============================================================================
// MultiLookup
// ============================================================================

/// A named set of [`Lookup`]s keyed by datasource identifier.
///
/// One lookup per distinct datasource; re-adding a datasource replaces the
/// prior lookup (last-write-wins). Grouped display order follows first
/// insertion, which is kept in a separate ordered key list.
#[derive(Debug, Clone, Default)]
pub struct MultiLookup {
    lookups: HashMap<String, Lookup>,
    order: Vec<String>,
}

impl MultiLookup {
    /// Creates an empty multi-lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a lookup for the given datasource and returns it for
    /// configuration.
    ///
    /// If the datasource was already registered the prior lookup is
    /// replaced wholesale; its display position is kept.
    pub fn add_lookup(&mut self, datasource: impl Into<String>) -> &mut Lookup {
        let datasource = datasource.into();
        if !self.lookups.contains_key(&datasource) {
            self.order.push(datasource.clone());
        }
        let lookup = Lookup::new(datasource.clone());
        match self.lookups.entry(datasource) {
            Entry::Occupied(mut entry) => {
                entry.insert(lookup);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(lookup),
        }
    }

    /// The lookup registered for `datasource`, if any.
    #[must_use]
    pub fn lookup(&self, datasource: &str) -> Option<&Lookup> {
        self.lookups.get(datasource)
    }

    /// Mutable access to the lookup registered for `datasource`, if any.
    pub fn lookup_mut(&mut self, datasource: &str) -> Option<&mut Lookup> {
        self.lookups.get_mut(datasource)
    }

    /// Registered datasource identifiers in display order.
    #[must_use]
    pub fn datasources(&self) -> &[String] {
        &self.order
    }

    /// Number of registered lookups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no lookups are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Lookups in display order, cloned for a session.
    pub(crate) fn ordered_lookups(&self) -> Vec<Lookup> {
        self.order
            .iter()
            .filter_map(|ds| self.lookups.get(ds).cloned())
            .collect()
    }

    /// Opens one popup search session spanning every registered lookup.
    ///
    /// Candidates from each datasource are concatenated in display order,
    /// each tagged with its lookup's header. The returned
    /// [`SelectionHandle`] resolves with the selected record, its
    /// originating datasource, and the search text at selection time.
    ///
    /// # Errors
    ///
    /// Fails if the initial load errors in the backend; no popup opens.
    pub fn show_popup(
        &self,
        backend: Arc<dyn RecordBackend>,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Result<(LookupPopup, SelectionHandle), LookupError> {
        LookupPopup::open_multi(self.ordered_lookups(), backend, anchor, options)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_get_round_trip() {
        let mut multi = MultiLookup::new();
        multi.add_lookup("db/example_data/products");

        let lookup = multi.lookup("db/example_data/products").unwrap();
        assert_eq!(lookup.data_source(), "db/example_data/products");
        assert!(multi.lookup("db/example_data/customers").is_none());
    }

    #[test]
    fn test_re_add_replaces_prior_lookup() {
        let mut multi = MultiLookup::new();
        multi
            .add_lookup("db/example_data/products")
            .add_field("productname");
        assert_eq!(
            multi.lookup("db/example_data/products").unwrap().field_count(),
            1
        );

        // Last write wins: the replacement has no fields.
        multi.add_lookup("db/example_data/products");
        assert_eq!(
            multi.lookup("db/example_data/products").unwrap().field_count(),
            0
        );
        assert_eq!(multi.len(), 1);
    }

    #[test]
    fn test_display_order_follows_first_insertion() {
        let mut multi = MultiLookup::new();
        multi.add_lookup("db/example_data/products");
        multi.add_lookup("db/example_data/customers");
        multi.add_lookup("db/example_data/products");

        assert_eq!(
            multi.datasources(),
            &[
                "db/example_data/products".to_string(),
                "db/example_data/customers".to_string(),
            ]
        );
    }

    #[test]
    fn test_ordered_lookups_clone_configuration() {
        let mut multi = MultiLookup::new();
        multi
            .add_lookup("db/example_data/customers")
            .set_display_field("companyname");

        let session_copy = multi.ordered_lookups();
        assert_eq!(session_copy.len(), 1);
        assert_eq!(session_copy[0].display_field(), Some("companyname"));
    }
}
