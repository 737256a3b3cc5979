//! The `relation` crate provides the row-oriented interface over heap files:
//! typed values, the binary row format, the heap table, and the index
//! lifecycle handle.

/// Column data types, tagged values, and rows.
pub mod value;

/// The binary row format.
pub mod marshal;

/// Errors raised by relations.
pub mod relation_error;

/// The heap table.
pub mod heap_table;

/// Lifecycle handle for an index on a heap table.
pub mod index;

pub use heap_table::{Handle, HeapTable};
pub use index::Index;
pub use relation_error::RelationError;
pub use value::{DataType, Row, Value};
