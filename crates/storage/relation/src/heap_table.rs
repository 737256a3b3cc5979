//! The heap table: the logical row interface over one heap file.

use crate::marshal::{marshal, unmarshal};
use crate::relation_error::RelationError;
use crate::value::{DataType, Row};
use file::{BlockStore, DiskBlockStore, FileError, HeapFile};
use page::{BlockID, RecordID};
use std::path::Path;

/// Stable reference to a row: the block it lives in and its record id within
/// that block. Valid across close/re-open for as long as the record is not
/// deleted.
pub type Handle = (BlockID, RecordID);

/// Row-oriented interface over a heap file. The schema (ordered column names
/// and their attributes) is held by the table; rows are plain mappings
/// validated against it.
#[derive(Debug)]
pub struct HeapTable<S: BlockStore = DiskBlockStore> {
    name: String,
    file: HeapFile<S>,
    column_names: Vec<String>,
    column_attributes: Vec<DataType>,
}

impl<S: BlockStore> HeapTable<S> {
    /// Binds a table handle to its backing heap file under `env_dir` without
    /// touching storage yet.
    pub fn new(
        env_dir: &Path,
        name: &str,
        column_names: Vec<String>,
        column_attributes: Vec<DataType>,
    ) -> Self {
        Self {
            name: name.to_string(),
            file: HeapFile::new(env_dir, name),
            column_names,
            column_attributes,
        }
    }

    /// Corresponds to `CREATE TABLE`: the backing file must not exist yet.
    pub fn create(&mut self) -> Result<(), RelationError> {
        Ok(self.file.create()?)
    }

    /// Corresponds to `CREATE TABLE IF NOT EXISTS`: attempts the create and
    /// falls back to opening when the file is already there.
    pub fn create_if_not_exists(&mut self) -> Result<(), RelationError> {
        match self.file.create() {
            Ok(()) => Ok(()),
            Err(FileError::AlreadyExists { .. }) => Ok(self.file.open()?),
            Err(e) => Err(e.into()),
        }
    }

    /// Opens the table for row operations. A no-op when already open.
    pub fn open(&mut self) -> Result<(), RelationError> {
        Ok(self.file.open()?)
    }

    /// Closes the table, releasing the file handle.
    pub fn close(&mut self) {
        self.file.close();
    }

    /// Corresponds to `DROP TABLE`: removes the backing file.
    pub fn drop(&mut self) -> Result<(), RelationError> {
        Ok(self.file.drop()?)
    }

    /// True when the row supplies every declared column.
    pub fn validate(&self, row: &Row) -> bool {
        self.column_names
            .iter()
            .all(|column| row.contains_key(column))
    }

    /// Corresponds to `INSERT INTO`: marshals the row and appends it to the
    /// newest block, allocating a fresh block when that one is full.
    ///
    /// Returns the handle of the stored row.
    pub fn insert(&mut self, row: &Row) -> Result<Handle, RelationError> {
        self.file.open()?;

        if let Some(missing) = self
            .column_names
            .iter()
            .find(|column| !row.contains_key(*column))
        {
            return Err(RelationError::MissingColumn {
                column: missing.clone(),
            });
        }

        let bytes = marshal(row, &self.column_names, &self.column_attributes)?;

        let mut page = self.file.get(self.file.last_block_id())?;
        let record_id = match page.add(&bytes) {
            Ok(id) => id,
            Err(e) if e.is_no_room() => {
                page = self.file.get_new()?;
                match page.add(&bytes) {
                    Ok(id) => id,
                    // A fresh page could not take it either: the row itself
                    // is too large for a block.
                    Err(e) if e.is_no_room() => {
                        return Err(RelationError::RowTooLarge { size: bytes.len() });
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Err(e) => return Err(e.into()),
        };

        self.file.put(&page)?;
        Ok((page.block_id(), record_id))
    }

    /// Full scan: one handle per live row, in block then record order. The
    /// result is materialised, not lazy.
    pub fn select(&mut self) -> Result<Vec<Handle>, RelationError> {
        self.file.open()?;

        let mut handles = Vec::new();
        for block_id in self.file.block_ids() {
            let page = self.file.get(block_id)?;
            for record_id in page.ids()? {
                handles.push((block_id, record_id));
            }
        }

        Ok(handles)
    }

    /// Full scan filtered by equality on every column present in `where_`.
    /// Rows lacking one of the probed columns match nothing.
    pub fn select_where(&mut self, where_: &Row) -> Result<Vec<Handle>, RelationError> {
        let mut handles = Vec::new();
        for handle in self.select()? {
            let row = self.project(handle)?;
            if where_.iter().all(|(column, value)| row.get(column) == Some(value)) {
                handles.push(handle);
            }
        }

        Ok(handles)
    }

    /// Unmarshals the full row behind a handle.
    pub fn project(&mut self, handle: Handle) -> Result<Row, RelationError> {
        self.file.open()?;

        let (block_id, record_id) = handle;
        let page = self.file.get(block_id)?;
        let Some(bytes) = page.get(record_id)? else {
            return Err(RelationError::NoSuchRecord { handle });
        };

        unmarshal(&bytes, &self.column_names, &self.column_attributes)
    }

    /// Unmarshals the row behind a handle restricted to the named columns.
    /// An empty name list means all columns.
    pub fn project_cols(
        &mut self,
        handle: Handle,
        column_names: &[String],
    ) -> Result<Row, RelationError> {
        let row = self.project(handle)?;

        if column_names.is_empty() {
            return Ok(row);
        }

        let mut restricted = Row::new();
        for column in column_names {
            if let Some(value) = row.get(column) {
                restricted.insert(column.clone(), value.clone());
            }
        }
        Ok(restricted)
    }

    /// Deletes the row behind a handle, retiring its record id.
    pub fn del(&mut self, handle: Handle) -> Result<(), RelationError> {
        self.file.open()?;

        let (block_id, record_id) = handle;
        let mut page = self.file.get(block_id)?;
        page.del(record_id)?;
        self.file.put(&page)?;
        Ok(())
    }

    /// The relation name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column names, in order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Declared column attributes, in column order.
    pub fn column_attributes(&self) -> &[DataType] {
        &self.column_attributes
    }
}
