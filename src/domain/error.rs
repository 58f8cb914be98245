//! Error types for lookup and search-session operations.
//!
//! Configuration mistakes (duplicate datasources, out-of-range field
//! removal) are handled by defined fallback behavior and never surface
//! here; this type covers backend query failures and misuse of a
//! closed session.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for lookup popup sessions and record-backend queries.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The named datasource is not known to the record backend.
    #[error("datasource '{0}' is not registered with the backend")]
    UnknownDatasource(String),

    /// The backend failed while loading or filtering rows.
    #[error("query failed: {message}")]
    Query {
        /// Description of the backend failure.
        message: String,
    },

    /// An operation was attempted on a session that already ended.
    #[error("search session is no longer open")]
    SessionClosed,
}

impl LookupError {
    /// Create a new query error with the given message.
    #[must_use]
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a new unknown-datasource error.
    #[must_use]
    pub fn unknown_datasource(datasource: impl Into<String>) -> Self {
        Self::UnknownDatasource(datasource.into())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LookupError::unknown_datasource("db/example_data/products");
        assert_eq!(
            format!("{err}"),
            "datasource 'db/example_data/products' is not registered with the backend"
        );

        let err = LookupError::query("disk on fire");
        assert_eq!(format!("{err}"), "query failed: disk on fire");

        let err = LookupError::SessionClosed;
        assert_eq!(format!("{err}"), "search session is no longer open");
    }

    #[test]
    fn test_query_error_creation() {
        let err = LookupError::query("bad predicate");
        match err {
            LookupError::Query { message } => assert_eq!(message, "bad predicate"),
            _ => panic!("Expected Query variant"),
        }
    }
}
