//! The heap file: an append-only sequence of slotted-page blocks backing one
//! relation.

use crate::api::{BlockStore, OpenMode};
use crate::disk_block_store::DiskBlockStore;
use crate::file_error::FileError;
use page::{BlockID, SlottedPage};
use std::path::{Path, PathBuf};

/// Multi-block container for one relation, backed by a single block store
/// file named `<name>.db` under the environment directory.
///
/// Blocks are numbered `1..=last` and allocation is append-only: there is no
/// free-page reclamation, that is the job of a later vacuum pass. The store
/// handle is held from `open`/`create` until `close`; dropping the value
/// closes it.
#[derive(Debug)]
pub struct HeapFile<S: BlockStore = DiskBlockStore> {
    name: String,
    path: PathBuf,
    store: Option<S>,
    /// High-water mark: the id of the newest block.
    last: BlockID,
}

impl<S: BlockStore> HeapFile<S> {
    /// Binds a heap file handle to `<env_dir>/<name>.db` without touching the
    /// file system yet.
    pub fn new(env_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: env_dir.join(format!("{name}.db")),
            store: None,
            last: 0,
        }
    }

    /// Creates the backing file, which must not exist yet, and allocates
    /// block 1.
    pub fn create(&mut self) -> Result<(), FileError> {
        self.store = Some(S::open(&self.path, OpenMode::Create)?);
        self.last = 0;
        tracing::debug!(file = %self.name, "created heap file");

        let first = self.get_new()?;
        self.put(&first)?;
        Ok(())
    }

    /// Opens the backing file and recovers the block high-water mark from it.
    /// A no-op when the file is already open.
    pub fn open(&mut self) -> Result<(), FileError> {
        if self.store.is_some() {
            return Ok(());
        }

        let store = S::open(&self.path, OpenMode::Open)?;
        self.last = store.block_count()?;
        self.store = Some(store);
        Ok(())
    }

    /// Releases the store handle. A no-op when the file is already closed;
    /// dropping the value has the same effect.
    pub fn close(&mut self) {
        self.store = None;
    }

    /// Closes and removes the backing file.
    pub fn drop(&mut self) -> Result<(), FileError> {
        self.close();
        S::remove(&self.path)?;
        self.last = 0;
        tracing::debug!(file = %self.name, "dropped heap file");
        Ok(())
    }

    /// Allocates the next block: bumps `last`, writes out a freshly
    /// initialized page, and reads it back so the returned page holds the
    /// stored bytes.
    pub fn get_new(&mut self) -> Result<SlottedPage, FileError> {
        let store = self.store.as_mut().ok_or(FileError::Closed)?;

        let block_id = self.last + 1;
        let page = SlottedPage::new(block_id)?;
        store.put(block_id, page.data())?;
        self.last = block_id;

        let data = store.get(block_id)?;
        Ok(SlottedPage::from_bytes(data, block_id))
    }

    /// Reads the block and overlays a slotted page on it.
    pub fn get(&self, block_id: BlockID) -> Result<SlottedPage, FileError> {
        let store = self.store.as_ref().ok_or(FileError::Closed)?;
        let data = store.get(block_id)?;
        Ok(SlottedPage::from_bytes(data, block_id))
    }

    /// Writes a page back under its block id. Mutated pages must come back
    /// through here before being discarded, or the mutation is lost.
    pub fn put(&mut self, page: &SlottedPage) -> Result<(), FileError> {
        let store = self.store.as_mut().ok_or(FileError::Closed)?;
        store.put(page.block_id(), page.data())
    }

    /// All block ids of this file in ascending order.
    pub fn block_ids(&self) -> Vec<BlockID> {
        (1..=self.last).collect()
    }

    /// The id of the newest block, 0 when no block was allocated yet.
    pub fn last_block_id(&self) -> BlockID {
        self.last
    }

    /// Whether the store handle is currently held.
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// The relation name this file backs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod heap_file_tests {
    use super::*;
    use crate::memory_block_store::MemoryBlockStore;

    fn memory_file(name: &str) -> HeapFile<MemoryBlockStore> {
        HeapFile::new(Path::new("/tmp/mem-env"), name)
    }

    #[test]
    fn create_allocates_block_one() {
        let mut file = memory_file("rel");
        file.create().unwrap();

        assert_eq!(file.last_block_id(), 1);
        assert_eq!(file.block_ids(), vec![1]);

        let page = file.get(1).unwrap();
        assert_eq!(page.num_records().unwrap(), 0);
    }

    #[test]
    fn block_ids_enumerate_every_allocated_block() {
        let mut file = memory_file("rel");
        file.create().unwrap();

        for _ in 0..4 {
            file.get_new().unwrap();
        }

        assert_eq!(file.block_ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(file.last_block_id(), 5);
    }

    #[test]
    fn mutated_pages_survive_put_and_get() {
        let mut file = memory_file("rel");
        file.create().unwrap();

        let mut page = file.get(1).unwrap();
        let id = page.add(b"kept across write-back").unwrap();
        file.put(&page).unwrap();

        let page = file.get(1).unwrap();
        assert_eq!(page.get(id).unwrap().unwrap(), b"kept across write-back");
    }

    #[test]
    fn operations_on_a_closed_file_fail() {
        let mut file = memory_file("rel");
        assert!(matches!(file.get(1), Err(FileError::Closed)));
        assert!(matches!(file.get_new(), Err(FileError::Closed)));

        file.create().unwrap();
        file.close();
        assert!(matches!(file.get(1), Err(FileError::Closed)));
        // close is idempotent
        file.close();
    }
}

#[cfg(test)]
mod disk_heap_file_tests {
    use super::*;

    #[test]
    fn create_refuses_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file: HeapFile = HeapFile::new(dir.path(), "twice");
        file.create().unwrap();

        let mut again: HeapFile = HeapFile::new(dir.path(), "twice");
        assert!(matches!(
            again.create(),
            Err(FileError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn reopen_recovers_the_high_water_mark() {
        let dir = tempfile::tempdir().unwrap();

        let mut file: HeapFile = HeapFile::new(dir.path(), "rel");
        file.create().unwrap();
        let mut page = file.get_new().unwrap();
        let record_id = page.add(b"still here after reopen").unwrap();
        file.put(&page).unwrap();
        let block_id = page.block_id();
        file.close();

        let mut reopened: HeapFile = HeapFile::new(dir.path(), "rel");
        reopened.open().unwrap();
        assert_eq!(reopened.last_block_id(), 2);
        assert_eq!(reopened.block_ids(), vec![1, 2]);

        let page = reopened.get(block_id).unwrap();
        assert_eq!(
            page.get(record_id).unwrap().unwrap(),
            b"still here after reopen"
        );
    }

    #[test]
    fn drop_removes_the_backing_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut file: HeapFile = HeapFile::new(dir.path(), "gone");
        file.create().unwrap();
        file.drop().unwrap();

        let mut reopened: HeapFile = HeapFile::new(dir.path(), "gone");
        assert!(matches!(reopened.open(), Err(FileError::NotFound { .. })));
    }
}
