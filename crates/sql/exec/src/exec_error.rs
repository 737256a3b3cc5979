use relation::RelationError;
use thiserror::Error;

/// Errors surfaced by the executor. The shell prints them as
/// `Error: <message>` and keeps its loop running.
#[derive(Debug, Error)]
pub enum ExecError {
    /// A storage or catalog failure, wrapped so the user sees where the
    /// error came from.
    #[error("DbRelationError: {0}")]
    Relation(#[from] RelationError),
    /// `DROP TABLE` of one of the reserved catalog tables.
    #[error("Cannot drop a schema table")]
    SchemaTableDrop,
}
