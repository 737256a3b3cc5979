//! Defines an in-memory implementation of the block store, used by tests.

use crate::api::{BlockStore, OpenMode};
use crate::file_error::FileError;
use page::{BLOCK_SZ, BlockID};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A HashMap backed block store. `OpenMode::Create` conflicts and `remove`
/// have nothing to act on without a shared registry behind them, so both are
/// accepted unconditionally; exclusive-create semantics are only meaningful
/// for the disk store.
#[derive(Debug, Default)]
pub struct MemoryBlockStore {
    path: PathBuf,
    blocks: HashMap<BlockID, Box<[u8; BLOCK_SZ]>>,
}

impl BlockStore for MemoryBlockStore {
    fn open(path: &Path, _mode: OpenMode) -> Result<Self, FileError> {
        Ok(Self {
            path: path.to_path_buf(),
            blocks: HashMap::new(),
        })
    }

    fn get(&self, block_id: BlockID) -> Result<Box<[u8; BLOCK_SZ]>, FileError> {
        match self.blocks.get(&block_id) {
            Some(block) => Ok(Box::new(**block)),
            None => Err(FileError::UnknownBlock { block_id }),
        }
    }

    fn put(&mut self, block_id: BlockID, block: &[u8; BLOCK_SZ]) -> Result<(), FileError> {
        self.blocks.insert(block_id, Box::new(*block));
        Ok(())
    }

    fn block_count(&self) -> Result<u32, FileError> {
        // The heap file allocates blocks contiguously from 1.
        Ok(self.blocks.len() as u32)
    }

    fn remove(_path: &Path) -> Result<(), FileError> {
        Ok(())
    }
}

impl MemoryBlockStore {
    /// The path this store was nominally opened at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
