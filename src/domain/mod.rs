//! Domain model for pick-list lookups.
//!
//! This module contains the configuration objects callers build before
//! opening a popup session:
//!
//! - [`LookupField`] - one searchable/displayable attribute
//! - [`Lookup`] - one datasource with its ordered fields
//! - [`MultiLookup`] - a datasource-keyed set of lookups
//! - [`Record`] - a row returned by a record backend
//! - [`LookupError`] - session/backend failures

// ============================================================================
// Module Declarations
// ============================================================================

pub mod error;
pub mod field;
pub mod lookup;
pub mod multi;
pub mod record;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::LookupError;
pub use field::LookupField;
pub use lookup::Lookup;
pub use multi::MultiLookup;
pub use record::Record;

/// Creates a lookup for one datasource.
///
/// Convenience constructor mirroring [`Lookup::new`].
#[must_use]
pub fn create_lookup(datasource: impl Into<String>) -> Lookup {
    Lookup::new(datasource)
}

/// Creates a multi-lookup pre-populated with one lookup per datasource.
#[must_use]
pub fn create_multi_ds_lookup<I, S>(datasources: I) -> MultiLookup
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut multi = MultiLookup::new();
    for datasource in datasources {
        multi.add_lookup(datasource);
    }
    multi
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lookup() {
        let lookup = create_lookup("db/example_data/products");
        assert_eq!(lookup.data_source(), "db/example_data/products");
    }

    #[test]
    fn test_create_multi_ds_lookup_registers_each_datasource() {
        let multi = create_multi_ds_lookup(["db/a/products", "db/a/customers"]);
        assert_eq!(multi.len(), 2);
        assert!(multi.lookup("db/a/products").is_some());
        assert!(multi.lookup("db/a/customers").is_some());
        assert_eq!(
            multi.lookup("db/a/customers").unwrap().header(),
            "customers"
        );
    }
}
