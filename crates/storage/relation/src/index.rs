//! Lifecycle handle for an index on a heap table.
//!
//! Only the physical lifecycle lives here: the index body (node layout,
//! search, maintenance) belongs to the index implementation working on the
//! blocks of the backing file.

use crate::relation_error::RelationError;
use file::{BlockStore, DiskBlockStore, HeapFile};
use std::path::Path;

/// An index named `i` on table `t`, backed by its own heap file named
/// `<t>-<i>` under the environment directory.
#[derive(Debug)]
pub struct Index<S: BlockStore = DiskBlockStore> {
    table_name: String,
    index_name: String,
    file: HeapFile<S>,
}

impl<S: BlockStore> Index<S> {
    /// Binds an index handle without touching storage yet.
    pub fn new(env_dir: &Path, table_name: &str, index_name: &str) -> Self {
        let file_name = format!("{table_name}-{index_name}");
        Self {
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            file: HeapFile::new(env_dir, &file_name),
        }
    }

    /// Creates the backing file with its root block; fails if the index
    /// already exists physically.
    pub fn create(&mut self) -> Result<(), RelationError> {
        Ok(self.file.create()?)
    }

    /// Opens the backing file.
    pub fn open(&mut self) -> Result<(), RelationError> {
        Ok(self.file.open()?)
    }

    /// Releases the file handle.
    pub fn close(&mut self) {
        self.file.close();
    }

    /// Removes the backing file. Fails when the index does not exist
    /// physically.
    pub fn drop(&mut self) -> Result<(), RelationError> {
        Ok(self.file.drop()?)
    }

    /// The table this index belongs to.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The index name.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;
    use file::FileError;

    #[test]
    fn lifecycle_creates_and_drops_the_backing_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut index: Index = Index::new(dir.path(), "ha", "fx");
        index.create().unwrap();
        assert!(dir.path().join("ha-fx.db").exists());

        index.close();
        index.open().unwrap();

        index.drop().unwrap();
        assert!(!dir.path().join("ha-fx.db").exists());
    }

    #[test]
    fn drop_of_a_missing_index_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut index: Index = Index::new(dir.path(), "ha", "nope");
        assert!(matches!(
            index.drop(),
            Err(RelationError::File(FileError::NotFound { .. }))
        ));
    }

    #[test]
    fn indexes_on_different_tables_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();

        let mut first: Index = Index::new(dir.path(), "t1", "idx");
        let mut second: Index = Index::new(dir.path(), "t2", "idx");
        first.create().unwrap();
        second.create().unwrap();

        first.drop().unwrap();
        second.drop().unwrap();
    }
}
