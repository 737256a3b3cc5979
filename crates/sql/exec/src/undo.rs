//! Compensating actions for multi-step DDL.
//!
//! Every catalog mutation a statement performs is recorded here as its
//! inverse. When a later step fails, the log fires in reverse order,
//! best-effort: secondary failures are swallowed so the primary error is
//! what the caller sees.

use catalog::Catalog;
use file::BlockStore;
use relation::Handle;

/// The inverse of one catalog mutation.
#[derive(Debug)]
pub(crate) enum UndoAction {
    /// Delete a row inserted into `_tables`.
    DeleteTableRow(Handle),
    /// Delete a row inserted into `_columns`.
    DeleteColumnRow(Handle),
    /// Delete a row inserted into `_indices`.
    DeleteIndexRow(Handle),
}

/// Ordered log of compensating actions for one statement.
#[derive(Debug, Default)]
pub(crate) struct UndoLog {
    actions: Vec<UndoAction>,
}

impl UndoLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the inverse of a mutation that just succeeded.
    pub(crate) fn record(&mut self, action: UndoAction) {
        self.actions.push(action);
    }

    /// Fires every recorded action in reverse order. Failures of individual
    /// compensations are ignored.
    pub(crate) fn rollback<S: BlockStore>(self, catalog: &mut Catalog<S>) {
        for action in self.actions.into_iter().rev() {
            let _ = match action {
                UndoAction::DeleteTableRow(handle) => catalog.tables.del(handle),
                UndoAction::DeleteColumnRow(handle) => catalog.columns.del(handle),
                UndoAction::DeleteIndexRow(handle) => catalog.indices.del(handle),
            };
        }
    }
}
