//! The DDL executor: consumes parsed statement nodes, mutates the catalog
//! and the physical storage behind them, and returns printable query
//! results. Partial failures roll back through compensating actions.

/// Statement nodes, the contract with the parsing collaborator.
pub mod ast;

/// Errors surfaced to the shell.
pub mod exec_error;

/// The statement executor.
pub mod executor;

/// Owned, printable query results.
pub mod query_result;

pub(crate) mod undo;

pub use exec_error::ExecError;
pub use executor::Executor;
pub use query_result::QueryResult;
