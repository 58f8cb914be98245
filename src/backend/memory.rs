//! In-memory record backend.
//!
//! Holds datasources as plain row vectors and implements the text match
//! itself: the search text is split on whitespace and every token must be
//! a case-insensitive substring of at least one registered field. Across
//! fields a single token needs only one hit (OR semantics).

use std::collections::HashMap;

use crate::backend::{RecordBackend, SearchQuery};
use crate::domain::{LookupError, Record};

// ============================================================================
// MemoryBackend
// ============================================================================

/// Record backend over in-process row vectors, keyed by datasource.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    datasources: HashMap<String, Vec<Record>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a datasource with its rows, replacing any prior rows.
    pub fn add_datasource(&mut self, datasource: impl Into<String>, rows: Vec<Record>) {
        self.datasources.insert(datasource.into(), rows);
    }

    fn rows(&self, datasource: &str) -> Result<&[Record], LookupError> {
        self.datasources
            .get(datasource)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::unknown_datasource(datasource))
    }
}

impl RecordBackend for MemoryBackend {
    fn load_all(&self, datasource: &str) -> Result<Vec<Record>, LookupError> {
        let rows = self.rows(datasource)?;
        tracing::debug!(datasource, rows = rows.len(), "unfiltered load");
        Ok(rows.to_vec())
    }

    fn query(&self, datasource: &str, query: &SearchQuery) -> Result<Vec<Record>, LookupError> {
        let rows = self.rows(datasource)?;
        let matches: Vec<Record> = rows
            .iter()
            .filter(|record| record_matches(record, query))
            .cloned()
            .collect();
        tracing::debug!(
            datasource,
            text = query.text(),
            hits = matches.len(),
            "filtered load"
        );
        Ok(matches)
    }
}

/// Token match: every whitespace token of the search text must hit at
/// least one provider; a token hits when it is a case-insensitive
/// substring of that field's text value.
fn record_matches(record: &Record, query: &SearchQuery) -> bool {
    if query.has_no_providers() {
        return false;
    }

    let field_texts: Vec<String> = query
        .providers()
        .iter()
        .filter_map(|provider| record.attribute_text(provider.data_provider()))
        .map(|text| text.to_lowercase())
        .collect();

    let mut tokens = query
        .text()
        .split_whitespace()
        .map(str::to_lowercase)
        .peekable();
    if tokens.peek().is_none() {
        return false;
    }

    tokens.all(|token| field_texts.iter().any(|text| text.contains(&token)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lookup;

    fn customers_backend() -> MemoryBackend {
        let mut backend = MemoryBackend::new();
        let mut rows = Vec::new();

        let mut r = Record::new("c1");
        r.set("companyname", "Around the Horn").set("country", "UK");
        rows.push(r);

        let mut r = Record::new("c2");
        r.set("companyname", "Bolido Comidas preparadas")
            .set("country", "Spain");
        rows.push(r);

        let mut r = Record::new("c3");
        r.set("companyname", "Galeria del gastronomo")
            .set("country", "Spain");
        rows.push(r);

        backend.add_datasource("db/example_data/customers", rows);
        backend
    }

    fn customer_lookup() -> Lookup {
        let mut lookup = Lookup::new("db/example_data/customers");
        lookup.add_field("companyname").set_title_text("Company");
        lookup.add_field("country").set_title_text("Country");
        lookup
    }

    #[test]
    fn test_load_all_returns_every_row() {
        let backend = customers_backend();
        let rows = backend.load_all("db/example_data/customers").unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_unknown_datasource_errors() {
        let backend = customers_backend();
        let err = backend.load_all("db/example_data/orders").unwrap_err();
        assert!(matches!(err, LookupError::UnknownDatasource(_)));

        let query = SearchQuery::for_lookup(&customer_lookup(), "x");
        let err = backend
            .query("db/example_data/orders", &query)
            .unwrap_err();
        assert!(matches!(err, LookupError::UnknownDatasource(_)));
    }

    #[test]
    fn test_or_semantics_across_fields() {
        // "Spain" misses companyname but hits country; the row is included.
        let backend = customers_backend();
        let query = SearchQuery::for_lookup(&customer_lookup(), "Spain");
        let rows = backend.query("db/example_data/customers", &query).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.attribute_text("country").as_deref() == Some("Spain")));
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let backend = customers_backend();
        let query = SearchQuery::for_lookup(&customer_lookup(), "horn");
        let rows = backend.query("db/example_data/customers", &query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "c1");
    }

    #[test]
    fn test_every_token_must_match_somewhere() {
        let backend = customers_backend();

        let query = SearchQuery::for_lookup(&customer_lookup(), "galeria spain");
        let rows = backend.query("db/example_data/customers", &query).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), "c3");

        let query = SearchQuery::for_lookup(&customer_lookup(), "galeria uk");
        let rows = backend.query("db/example_data/customers", &query).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_no_providers_matches_nothing() {
        let backend = customers_backend();
        let mut lookup = Lookup::new("db/example_data/customers");
        lookup.add_field("companyname").set_searchable(false);

        let query = SearchQuery::for_lookup(&lookup, "Spain");
        let rows = backend.query("db/example_data/customers", &query).unwrap();
        assert!(rows.is_empty());
    }
}
