//! A single searchable/displayable attribute of a lookup datasource.

// ============================================================================
// LookupField
// ============================================================================

/// One attribute definition within a [`Lookup`](super::Lookup).
///
/// The data provider is fixed at construction; presentation and search
/// attributes are mutable through fluent setters that return the field
/// again so configuration can be chained:
///
/// ```
/// use picklist::Lookup;
///
/// let mut lookup = Lookup::new("db/example_data/products");
/// lookup
///     .add_field("productname")
///     .set_title_text("Product")
///     .set_searchable(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupField {
    data_provider: String,
    title_text: String,
    searchable: bool,
    visible: bool,
    value_list_name: Option<String>,
    format: Option<String>,
}

impl LookupField {
    /// Creates a field for the given data provider.
    ///
    /// The title text defaults to the data provider itself; the field
    /// starts searchable and visible. No validation is performed on the
    /// provider name — callers supply identifiers meaningful to their
    /// record backend.
    #[must_use]
    pub fn new(data_provider: impl Into<String>) -> Self {
        let data_provider = data_provider.into();
        Self {
            title_text: data_provider.clone(),
            data_provider,
            searchable: true,
            visible: true,
            value_list_name: None,
            format: None,
        }
    }

    /// The attribute identifier on the record collection.
    #[must_use]
    pub fn data_provider(&self) -> &str {
        &self.data_provider
    }

    /// Marks the field searchable (`true`) or display-only (`false`).
    pub fn set_searchable(&mut self, searchable: bool) -> &mut Self {
        self.searchable = searchable;
        self
    }

    /// Whether the field participates in search matching.
    #[must_use]
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Sets the display label for this field.
    pub fn set_title_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.title_text = text.into();
        self
    }

    /// The display label for this field.
    #[must_use]
    pub fn title_text(&self) -> &str {
        &self.title_text
    }

    /// Sets whether the field is rendered in the popup.
    ///
    /// Invisible fields still participate in search matching.
    pub fn set_visible(&mut self, visible: bool) -> &mut Self {
        self.visible = visible;
        self
    }

    /// Whether the field is rendered in the popup.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets an external value-list reference used to display this field.
    pub fn set_value_list_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.value_list_name = Some(name.into());
        self
    }

    /// The external value-list reference, if any.
    #[must_use]
    pub fn value_list_name(&self) -> Option<&str> {
        self.value_list_name.as_deref()
    }

    /// Sets the display format string for this field. Not validated.
    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = Some(format.into());
        self
    }

    /// The display format string, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

// ============================================================================
// Tests
// ============================================================================
