use file::{BlockStore, DiskBlockStore};
use relation::value::row_from;
use relation::{DataType, HeapTable, Index, RelationError, Value};
use std::path::{Path, PathBuf};

/// Name of the catalog table listing every table.
pub const TABLES_TABLE_NAME: &str = "_tables";

/// Name of the catalog table listing every column of every table.
pub const COLUMNS_TABLE_NAME: &str = "_columns";

/// Name of the catalog table listing every `(table, index, column)` tuple.
pub const INDICES_TABLE_NAME: &str = "_indices";

/// The catalog names are reserved: they never show up in `SHOW TABLES` and
/// cannot be dropped.
pub fn is_schema_table(table_name: &str) -> bool {
    table_name == TABLES_TABLE_NAME
        || table_name == COLUMNS_TABLE_NAME
        || table_name == INDICES_TABLE_NAME
}

/// Owner of the three schema heap tables, constructed once at startup and
/// threaded through the executor. Schema metadata lives in ordinary heap
/// rows, so the catalog bootstraps itself on first use and simply re-opens
/// afterwards.
#[derive(Debug)]
pub struct Catalog<S: BlockStore = DiskBlockStore> {
    env_dir: PathBuf,
    /// The `_tables` relation: one row per table, `(table_name TEXT)`.
    pub tables: HeapTable<S>,
    /// The `_columns` relation: one row per column,
    /// `(table_name TEXT, column_name TEXT, data_type TEXT)`.
    pub columns: HeapTable<S>,
    /// The `_indices` relation: one row per indexed column,
    /// `(table_name, index_name, seq_in_index, column_name, index_type,
    /// is_unique)`.
    pub indices: HeapTable<S>,
}

impl<S: BlockStore> Catalog<S> {
    /// Opens (or bootstraps) the catalog under the environment directory.
    pub fn open(env_dir: impl Into<PathBuf>) -> Result<Self, RelationError> {
        let env_dir = env_dir.into();

        let mut tables = HeapTable::new(
            &env_dir,
            TABLES_TABLE_NAME,
            vec!["table_name".to_string()],
            vec![DataType::Text],
        );
        let mut columns = HeapTable::new(
            &env_dir,
            COLUMNS_TABLE_NAME,
            vec![
                "table_name".to_string(),
                "column_name".to_string(),
                "data_type".to_string(),
            ],
            vec![DataType::Text, DataType::Text, DataType::Text],
        );
        let mut indices = HeapTable::new(
            &env_dir,
            INDICES_TABLE_NAME,
            vec![
                "table_name".to_string(),
                "index_name".to_string(),
                "seq_in_index".to_string(),
                "column_name".to_string(),
                "index_type".to_string(),
                "is_unique".to_string(),
            ],
            vec![
                DataType::Text,
                DataType::Text,
                DataType::Int,
                DataType::Text,
                DataType::Text,
                DataType::Boolean,
            ],
        );

        tables.create_if_not_exists()?;
        columns.create_if_not_exists()?;
        indices.create_if_not_exists()?;

        let mut catalog = Self {
            env_dir,
            tables,
            columns,
            indices,
        };
        catalog.seed()?;
        Ok(catalog)
    }

    /// Seeds the catalog's self-description: the three table rows in
    /// `_tables` and the schema tables' own columns in `_columns`. Each probe
    /// inserts only when nothing is there yet, so re-opening an environment
    /// leaves it untouched.
    fn seed(&mut self) -> Result<(), RelationError> {
        for table_name in [TABLES_TABLE_NAME, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME] {
            let row = row_from([("table_name", Value::from(table_name))]);
            if self.tables.select_where(&row)?.is_empty() {
                self.tables.insert(&row)?;
            }
        }

        self.seed_columns(TABLES_TABLE_NAME, &[("table_name", DataType::Text)])?;
        self.seed_columns(
            COLUMNS_TABLE_NAME,
            &[
                ("table_name", DataType::Text),
                ("column_name", DataType::Text),
                ("data_type", DataType::Text),
            ],
        )?;
        self.seed_columns(
            INDICES_TABLE_NAME,
            &[
                ("table_name", DataType::Text),
                ("index_name", DataType::Text),
                ("seq_in_index", DataType::Int),
                ("column_name", DataType::Text),
                ("index_type", DataType::Text),
                ("is_unique", DataType::Boolean),
            ],
        )?;

        Ok(())
    }

    fn seed_columns(
        &mut self,
        table_name: &str,
        table_columns: &[(&str, DataType)],
    ) -> Result<(), RelationError> {
        let probe = row_from([("table_name", Value::from(table_name))]);
        if !self.columns.select_where(&probe)?.is_empty() {
            return Ok(());
        }

        for (column_name, data_type) in table_columns {
            let row = row_from([
                ("table_name", Value::from(table_name)),
                ("column_name", Value::from(*column_name)),
                ("data_type", Value::from(data_type.to_string())),
            ]);
            self.columns.insert(&row)?;
        }

        Ok(())
    }

    /// Rebuilds a table handle from its `_columns` rows. The full-scan order
    /// guarantee keeps the columns in their declared order. A name with no
    /// catalog rows yields a table with an empty schema, which is still
    /// enough to drop its file.
    pub fn table(&mut self, table_name: &str) -> Result<HeapTable<S>, RelationError> {
        let probe = row_from([("table_name", Value::from(table_name))]);

        let mut column_names = Vec::new();
        let mut column_attributes = Vec::new();
        for handle in self.columns.select_where(&probe)? {
            let row = self.columns.project(handle)?;

            let column_name = match row.get("column_name") {
                Some(Value::Text(name)) => name.clone(),
                _ => return Err(RelationError::TruncatedRow),
            };
            let data_type = match row.get("data_type") {
                Some(Value::Text(spelling)) => DataType::try_from(spelling.as_str())
                    .map_err(|_| RelationError::UnknownDataType {
                        found: spelling.clone(),
                    })?,
                _ => return Err(RelationError::TruncatedRow),
            };

            column_names.push(column_name);
            column_attributes.push(data_type);
        }

        Ok(HeapTable::new(
            &self.env_dir,
            table_name,
            column_names,
            column_attributes,
        ))
    }

    /// Constructs the lifecycle handle for index `index_name` on
    /// `table_name`.
    pub fn index(&self, table_name: &str, index_name: &str) -> Index<S> {
        Index::new(&self.env_dir, table_name, index_name)
    }

    /// The environment directory every relation of this catalog lives under.
    pub fn env_dir(&self) -> &Path {
        &self.env_dir
    }
}
