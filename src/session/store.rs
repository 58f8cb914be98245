//! Ephemeral per-session candidate storage.
//!
//! Every popup session gets its own uniquely named store holding the
//! current candidate rows (identity column + display column). The store
//! never outlives its session: it is released on selection, cancellation,
//! and on search errors alike.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Candidate Rows
// ============================================================================

/// One row of the session store: identity plus the rendered display value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    /// Stable identity of the backing record.
    pub id: String,
    /// Display column shown in the popup.
    pub display: String,
}

// ============================================================================
// CandidateStore
// ============================================================================

/// Transient, uniquely named row store for one session.
#[derive(Debug)]
pub struct CandidateStore {
    name: String,
    rows: Vec<CandidateRow>,
    released: bool,
}

impl CandidateStore {
    /// The unique name of this store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current rows, in candidate order.
    #[must_use]
    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    /// Replaces the store contents with a fresh candidate set.
    pub fn replace_rows(&mut self, rows: Vec<CandidateRow>) {
        self.rows = rows;
    }

    /// Drops all rows and marks the store released.
    pub fn release(&mut self) {
        self.rows.clear();
        self.rows.shrink_to_fit();
        self.released = true;
    }

    /// Whether the store has been released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

// ============================================================================
// Provisioner
// ============================================================================

/// Allocates a transient row store, distinct per session.
pub trait StoreProvisioner {
    /// Provisions a fresh, empty store with a unique name.
    fn provision(&self) -> CandidateStore;
}

/// Default provisioner: names stores `picklist_<pid>_<n>` from a
/// process-wide counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransientProvisioner;

static STORE_COUNTER: AtomicU64 = AtomicU64::new(0);

impl StoreProvisioner for TransientProvisioner {
    fn provision(&self) -> CandidateStore {
        let n = STORE_COUNTER.fetch_add(1, Ordering::Relaxed);
        CandidateStore {
            name: format!("picklist_{}_{}", process::id(), n),
            rows: Vec::new(),
            released: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioned_stores_have_unique_names() {
        let provisioner = TransientProvisioner;
        let a = provisioner.provision();
        let b = provisioner.provision();
        assert_ne!(a.name(), b.name());
        assert!(a.name().starts_with("picklist_"));
    }

    #[test]
    fn test_release_clears_rows() {
        let mut store = TransientProvisioner.provision();
        store.replace_rows(vec![CandidateRow {
            id: "r1".into(),
            display: "Chai".into(),
        }]);
        assert_eq!(store.rows().len(), 1);
        assert!(!store.is_released());

        store.release();
        assert!(store.rows().is_empty());
        assert!(store.is_released());
    }
}
