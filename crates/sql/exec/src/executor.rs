use crate::ast::{ColumnDefinition, ColumnType, CreateStatement, DropStatement, ShowStatement, Statement};
use crate::exec_error::ExecError;
use crate::query_result::QueryResult;
use crate::undo::{UndoAction, UndoLog};
use catalog::{Catalog, is_schema_table};
use file::{BlockStore, DiskBlockStore};
use relation::value::row_from;
use relation::{DataType, HeapTable, Value};
use std::path::PathBuf;

/// The statement executor. Owns the catalog for the lifetime of the session
/// and is the only writer of it.
///
/// Every DDL statement orders its catalog mutations before the physical
/// effect, so on failure the recorded compensations are enough to restore
/// the catalog.
#[derive(Debug)]
pub struct Executor<S: BlockStore = DiskBlockStore> {
    catalog: Catalog<S>,
}

impl<S: BlockStore> Executor<S> {
    /// Opens (bootstrapping if needed) the catalog under the environment
    /// directory.
    pub fn new(env_dir: impl Into<PathBuf>) -> Result<Self, ExecError> {
        Ok(Self {
            catalog: Catalog::open(env_dir)?,
        })
    }

    /// The catalog this executor works on.
    pub fn catalog(&mut self) -> &mut Catalog<S> {
        &mut self.catalog
    }

    /// Executes one parsed statement and returns its printable result.
    pub fn execute(&mut self, statement: &Statement) -> Result<QueryResult, ExecError> {
        match statement {
            Statement::Create(CreateStatement::Table {
                table_name,
                columns,
            }) => self.create_table(table_name, columns),
            Statement::Create(CreateStatement::Index {
                index_name,
                table_name,
                columns,
                index_type,
            }) => self.create_index(index_name, table_name, columns, index_type.as_deref()),
            Statement::Drop(DropStatement::Table { table_name }) => self.drop_table(table_name),
            Statement::Drop(DropStatement::Index {
                index_name,
                table_name,
            }) => self.drop_index(index_name, table_name),
            Statement::Show(ShowStatement::Tables) => self.show_tables(),
            Statement::Show(ShowStatement::Columns { table_name }) => {
                self.show_columns(table_name)
            }
            Statement::Show(ShowStatement::Index { table_name }) => self.show_index(table_name),
        }
    }

    fn create_table(
        &mut self,
        table_name: &str,
        columns: &[ColumnDefinition],
    ) -> Result<QueryResult, ExecError> {
        let mut undo = UndoLog::new();
        let result = self.try_create_table(table_name, columns, &mut undo);
        if result.is_err() {
            undo.rollback(&mut self.catalog);
        }
        result
    }

    fn try_create_table(
        &mut self,
        table_name: &str,
        columns: &[ColumnDefinition],
        undo: &mut UndoLog,
    ) -> Result<QueryResult, ExecError> {
        let table_row = row_from([("table_name", Value::from(table_name))]);
        let table_handle = self.catalog.tables.insert(&table_row)?;
        undo.record(UndoAction::DeleteTableRow(table_handle));

        let mut column_names = Vec::new();
        let mut column_attributes = Vec::new();
        for column in columns {
            let data_type = column_data_type(column.column_type);
            let column_row = row_from([
                ("table_name", Value::from(table_name)),
                ("column_name", Value::from(column.name.as_str())),
                ("data_type", Value::from(data_type.to_string())),
            ]);
            let column_handle = self.catalog.columns.insert(&column_row)?;
            undo.record(UndoAction::DeleteColumnRow(column_handle));

            column_names.push(column.name.clone());
            column_attributes.push(data_type);
        }

        // The physical effect comes last, once the catalog holds the rows
        // whose handles the rollback would need.
        let mut table = HeapTable::<S>::new(
            self.catalog.env_dir(),
            table_name,
            column_names,
            column_attributes,
        );
        table.create()?;

        tracing::info!(table = table_name, "created table");
        Ok(QueryResult::with_message(format!("created {table_name}")))
    }

    fn drop_table(&mut self, table_name: &str) -> Result<QueryResult, ExecError> {
        if is_schema_table(table_name) {
            return Err(ExecError::SchemaTableDrop);
        }

        let mut table = self.catalog.table(table_name)?;
        let where_ = row_from([("table_name", Value::from(table_name))]);

        for handle in self.catalog.columns.select_where(&where_)? {
            self.catalog.columns.del(handle)?;
        }

        table.drop()?;

        for handle in self.catalog.tables.select_where(&where_)? {
            self.catalog.tables.del(handle)?;
        }

        tracing::info!(table = table_name, "dropped table");
        Ok(QueryResult::with_message(format!("dropped {table_name}")))
    }

    fn create_index(
        &mut self,
        index_name: &str,
        table_name: &str,
        columns: &[String],
        index_type: Option<&str>,
    ) -> Result<QueryResult, ExecError> {
        let mut undo = UndoLog::new();
        let result = self.try_create_index(index_name, table_name, columns, index_type, &mut undo);
        if result.is_err() {
            undo.rollback(&mut self.catalog);
        }
        result
    }

    fn try_create_index(
        &mut self,
        index_name: &str,
        table_name: &str,
        columns: &[String],
        index_type: Option<&str>,
        undo: &mut UndoLog,
    ) -> Result<QueryResult, ExecError> {
        // The shell lower-cases its input; the canonical spelling is upper
        // case, and only genuine BTREE indexes are unique.
        let index_type = match index_type {
            Some(t) => t.to_uppercase(),
            None => "BTREE".to_string(),
        };
        let is_unique = index_type == "BTREE";

        for (position, column_name) in columns.iter().enumerate() {
            let row = row_from([
                ("table_name", Value::from(table_name)),
                ("index_name", Value::from(index_name)),
                ("seq_in_index", Value::from(position as i32 + 1)),
                ("column_name", Value::from(column_name.as_str())),
                ("index_type", Value::from(index_type.as_str())),
                ("is_unique", Value::from(is_unique)),
            ]);
            let handle = self.catalog.indices.insert(&row)?;
            undo.record(UndoAction::DeleteIndexRow(handle));
        }

        let mut index = self.catalog.index(table_name, index_name);
        index.create()?;

        tracing::info!(index = index_name, table = table_name, "created index");
        Ok(QueryResult::with_message(format!(
            "created index {index_name}"
        )))
    }

    fn drop_index(&mut self, index_name: &str, table_name: &str) -> Result<QueryResult, ExecError> {
        // Physical drop first; when it fails the catalog stays untouched.
        let mut index = self.catalog.index(table_name, index_name);
        if index.drop().is_err() {
            return Ok(QueryResult::with_message(format!(
                "index {index_name} not found"
            )));
        }

        let where_ = row_from([
            ("table_name", Value::from(table_name)),
            ("index_name", Value::from(index_name)),
        ]);
        for handle in self.catalog.indices.select_where(&where_)? {
            self.catalog.indices.del(handle)?;
        }

        tracing::info!(index = index_name, table = table_name, "dropped index");
        Ok(QueryResult::with_message(format!(
            "dropped index {index_name}"
        )))
    }

    fn show_tables(&mut self) -> Result<QueryResult, ExecError> {
        let column_names = vec!["table_name".to_string()];

        let mut rows = Vec::new();
        for handle in self.catalog.tables.select()? {
            let row = self.catalog.tables.project_cols(handle, &column_names)?;
            if let Some(Value::Text(name)) = row.get("table_name")
                && is_schema_table(name)
            {
                continue;
            }
            rows.push(row);
        }

        let message = format!("successfully returned {} rows", rows.len());
        Ok(QueryResult::with_rows(
            column_names,
            vec![DataType::Text],
            rows,
            message,
        ))
    }

    fn show_columns(&mut self, table_name: &str) -> Result<QueryResult, ExecError> {
        let column_names = vec![
            "table_name".to_string(),
            "column_name".to_string(),
            "data_type".to_string(),
        ];
        let where_ = row_from([("table_name", Value::from(table_name))]);

        let mut rows = Vec::new();
        for handle in self.catalog.columns.select_where(&where_)? {
            rows.push(self.catalog.columns.project_cols(handle, &column_names)?);
        }

        let message = format!("successfully returned {} rows", rows.len());
        Ok(QueryResult::with_rows(
            column_names,
            vec![DataType::Text, DataType::Text, DataType::Text],
            rows,
            message,
        ))
    }

    fn show_index(&mut self, table_name: &str) -> Result<QueryResult, ExecError> {
        let column_names = vec![
            "table_name".to_string(),
            "index_name".to_string(),
            "column_name".to_string(),
            "seq_in_index".to_string(),
            "index_type".to_string(),
            "is_unique".to_string(),
        ];
        let where_ = row_from([("table_name", Value::from(table_name))]);

        let mut rows = Vec::new();
        for handle in self.catalog.indices.select_where(&where_)? {
            rows.push(self.catalog.indices.project_cols(handle, &column_names)?);
        }

        let message = format!("successfully returned {} rows", rows.len());
        Ok(QueryResult::with_rows(
            column_names,
            vec![
                DataType::Text,
                DataType::Text,
                DataType::Text,
                DataType::Int,
                DataType::Text,
                DataType::Boolean,
            ],
            rows,
            message,
        ))
    }
}

fn column_data_type(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Int => DataType::Int,
        ColumnType::Text => DataType::Text,
    }
}

#[cfg(test)]
mod executor_tests {
    use super::*;
    use crate::ast::ColumnDefinition;

    fn int_column(name: &str) -> ColumnDefinition {
        ColumnDefinition {
            name: name.to_string(),
            column_type: ColumnType::Int,
        }
    }

    fn create_table_statement(table_name: &str, columns: &[&str]) -> Statement {
        Statement::Create(CreateStatement::Table {
            table_name: table_name.to_string(),
            columns: columns.iter().map(|c| int_column(c)).collect(),
        })
    }

    #[test]
    fn drop_of_a_schema_table_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor: Executor = Executor::new(dir.path()).unwrap();

        for reserved in ["_tables", "_columns", "_indices"] {
            let statement = Statement::Drop(DropStatement::Table {
                table_name: reserved.to_string(),
            });
            let err = executor.execute(&statement).unwrap_err();
            assert!(matches!(err, ExecError::SchemaTableDrop));
        }
    }

    #[test]
    fn failed_physical_create_rolls_the_catalog_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor: Executor = Executor::new(dir.path()).unwrap();

        let statement = create_table_statement("t", &["x", "y"]);
        executor.execute(&statement).unwrap();

        // The second create reaches the physical step, which refuses the
        // existing file; every row the statement inserted must be gone.
        let err = executor.execute(&statement).unwrap_err();
        assert!(matches!(err, ExecError::Relation(_)));

        let probe = row_from([("table_name", Value::from("t"))]);
        assert_eq!(
            executor.catalog().tables.select_where(&probe).unwrap().len(),
            1
        );
        assert_eq!(
            executor
                .catalog()
                .columns
                .select_where(&probe)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn failed_physical_index_create_rolls_the_catalog_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor: Executor = Executor::new(dir.path()).unwrap();

        executor
            .execute(&create_table_statement("t", &["x"]))
            .unwrap();

        let statement = Statement::Create(CreateStatement::Index {
            index_name: "ix".to_string(),
            table_name: "t".to_string(),
            columns: vec!["x".to_string()],
            index_type: None,
        });
        executor.execute(&statement).unwrap();
        let err = executor.execute(&statement).unwrap_err();
        assert!(matches!(err, ExecError::Relation(_)));

        let probe = row_from([("index_name", Value::from("ix"))]);
        assert_eq!(
            executor
                .catalog()
                .indices
                .select_where(&probe)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn drop_of_a_missing_index_reports_not_found_without_touching_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor: Executor = Executor::new(dir.path()).unwrap();

        let statement = Statement::Drop(DropStatement::Index {
            index_name: "ghost".to_string(),
            table_name: "t".to_string(),
        });
        let result = executor.execute(&statement).unwrap();
        assert_eq!(result.message(), "index ghost not found");
    }

    #[test]
    fn non_btree_index_types_are_not_unique() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor: Executor = Executor::new(dir.path()).unwrap();

        executor
            .execute(&create_table_statement("t", &["x"]))
            .unwrap();
        executor
            .execute(&Statement::Create(CreateStatement::Index {
                index_name: "hx".to_string(),
                table_name: "t".to_string(),
                columns: vec!["x".to_string()],
                index_type: Some("hash".to_string()),
            }))
            .unwrap();

        let probe = row_from([("index_name", Value::from("hx"))]);
        let handles = executor.catalog().indices.select_where(&probe).unwrap();
        assert_eq!(handles.len(), 1);
        let row = executor.catalog().indices.project(handles[0]).unwrap();
        assert_eq!(row.get("index_type"), Some(&Value::Text("HASH".into())));
        assert_eq!(row.get("is_unique"), Some(&Value::Bool(false)));
    }
}
