//! Lookup configuration for one record collection.

use std::sync::Arc;

use crate::backend::RecordBackend;
use crate::domain::{LookupError, LookupField};
use crate::session::SelectionHandle;
use crate::ui::{LookupPopup, PopupAnchor, PopupOptions};

// ============================================================================
// Lookup
// ============================================================================

/// Search/display configuration for a single datasource.
///
/// A lookup names one record collection and owns an ordered list of
/// [`LookupField`]s. Insertion order is display and search order; fields
/// are only ever reordered by explicit removal. The lookup itself carries
/// no session state, so one configured instance can back any number of
/// sequential popup sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    datasource: String,
    fields: Vec<LookupField>,
    display_field: Option<String>,
    header: String,
}

impl Lookup {
    /// Creates a lookup for the given datasource identifier.
    ///
    /// The header starts at the datasource-derived default (its final
    /// `/`-separated path segment).
    #[must_use]
    pub fn new(datasource: impl Into<String>) -> Self {
        let datasource = datasource.into();
        let header = derive_header(&datasource);
        Self {
            datasource,
            fields: Vec::new(),
            display_field: None,
            header,
        }
    }

    /// The datasource identifier this lookup searches.
    #[must_use]
    pub fn data_source(&self) -> &str {
        &self.datasource
    }

    /// Appends a new field for the given data provider and returns it for
    /// fluent configuration.
    ///
    /// Duplicate data providers are permitted; each call appends an
    /// independent field.
    pub fn add_field(&mut self, data_provider: impl Into<String>) -> &mut LookupField {
        self.fields.push(LookupField::new(data_provider));
        // Just pushed, so the index is valid.
        self.fields.last_mut().unwrap()
    }

    /// The field at `index`, if any.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&LookupField> {
        self.fields.get(index)
    }

    /// Mutable access to the field at `index`, if any.
    pub fn field_mut(&mut self, index: usize) -> Option<&mut LookupField> {
        self.fields.get_mut(index)
    }

    /// All fields, in display/search order.
    #[must_use]
    pub fn fields(&self) -> &[LookupField] {
        &self.fields
    }

    /// Removes the field at `index`. Out-of-range indices are a no-op.
    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
        }
    }

    /// Number of configured fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Sets the attribute whose value labels a selected row.
    ///
    /// No validation is performed against the underlying collection.
    pub fn set_display_field(&mut self, data_provider: impl Into<String>) -> &mut Self {
        self.display_field = Some(data_provider.into());
        self
    }

    /// The configured display attribute, if any.
    #[must_use]
    pub fn display_field(&self) -> Option<&str> {
        self.display_field.as_deref()
    }

    /// Sets the header shown above this lookup's rows in grouped results.
    ///
    /// Empty text resolves to the datasource-derived default. Returns the
    /// resolved header.
    pub fn set_header(&mut self, text: &str) -> &str {
        if text.is_empty() {
            self.header = derive_header(&self.datasource);
        } else {
            self.header = text.to_string();
        }
        &self.header
    }

    /// The header shown above this lookup's rows in grouped results.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Opens a popup search session over this lookup alone.
    ///
    /// The session works on a clone of this configuration; the lookup is
    /// untouched and can be reconfigured or reused while the popup is up.
    /// Returns the popup controller plus a [`SelectionHandle`] that
    /// resolves to `Some(selection)` on a pick and `None` on dismissal.
    ///
    /// # Errors
    ///
    /// Fails if the initial (or `initial_value`-seeded) load errors in the
    /// backend; no popup opens and the handle never fires.
    pub fn show_popup(
        &self,
        backend: Arc<dyn RecordBackend>,
        anchor: PopupAnchor,
        options: PopupOptions,
    ) -> Result<(LookupPopup, SelectionHandle), LookupError> {
        LookupPopup::open_single(self.clone(), backend, anchor, options)
    }
}

/// Default header for a datasource: its final `/`-separated segment.
fn derive_header(datasource: &str) -> String {
    datasource
        .rsplit('/')
        .next()
        .unwrap_or(datasource)
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_field_count_tracks_adds_and_removes() {
        let mut lookup = Lookup::new("db/example_data/products");
        assert_eq!(lookup.field_count(), 0);

        lookup.add_field("productname");
        lookup.add_field("categoryname");
        lookup.add_field("companyname");
        assert_eq!(lookup.field_count(), 3);

        lookup.remove_field(1);
        assert_eq!(lookup.field_count(), 2);
        assert_eq!(lookup.field(0).unwrap().data_provider(), "productname");
        assert_eq!(lookup.field(1).unwrap().data_provider(), "companyname");
    }

    #[test]
    fn test_remove_field_out_of_range_is_noop() {
        let mut lookup = Lookup::new("db/example_data/products");
        lookup.add_field("productname");
        lookup.remove_field(5);
        assert_eq!(lookup.field_count(), 1);
    }

    #[test]
    fn test_duplicate_data_providers_are_independent() {
        let mut lookup = Lookup::new("db/example_data/products");
        lookup.add_field("productname").set_title_text("First");
        lookup.add_field("productname").set_title_text("Second");

        assert_eq!(lookup.field_count(), 2);
        assert_eq!(lookup.field(0).unwrap().title_text(), "First");
        assert_eq!(lookup.field(1).unwrap().title_text(), "Second");
    }

    #[rstest]
    #[case("db/example_data/products", "products")]
    #[case("db/products", "products")]
    #[case("products", "products")]
    fn test_header_defaults_to_last_path_segment(
        #[case] datasource: &str,
        #[case] expected: &str,
    ) {
        let lookup = Lookup::new(datasource);
        assert_eq!(lookup.header(), expected);
    }

    #[test]
    fn test_set_header_empty_resolves_default() {
        let mut lookup = Lookup::new("db/example_data/customers");
        lookup.set_header("Clients");
        assert_eq!(lookup.header(), "Clients");

        assert_eq!(lookup.set_header(""), "customers");
        assert_eq!(lookup.header(), "customers");
    }

    #[test]
    fn test_set_header_custom_wins_over_datasource() {
        let mut lookup = Lookup::new("db/example_data/products");
        assert_eq!(lookup.set_header("Custom"), "Custom");
        assert_eq!(lookup.header(), "Custom");
    }

    #[test]
    fn test_display_field_accessor() {
        let mut lookup = Lookup::new("db/example_data/products");
        assert_eq!(lookup.display_field(), None);
        lookup.set_display_field("productname");
        assert_eq!(lookup.display_field(), Some("productname"));
    }
}
