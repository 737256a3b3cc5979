//! The schema catalog: three heap tables (`_tables`, `_columns`, `_indices`)
//! that persist table and index metadata as ordinary rows.

pub mod catalog;

pub use catalog::{
    COLUMNS_TABLE_NAME, Catalog, INDICES_TABLE_NAME, TABLES_TABLE_NAME, is_schema_table,
};
