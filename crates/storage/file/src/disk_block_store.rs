use crate::api::{BlockStore, OpenMode};
use crate::file_error::FileError;
use page::{BLOCK_SZ, BlockID};
use std::fs;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

/// A disk based block store: one file of fixed-length records, block *k*
/// stored at byte offset `(k - 1) * BLOCK_SZ`.
#[derive(Debug)]
pub struct DiskBlockStore {
    path: PathBuf,
    file: File,
}

impl BlockStore for DiskBlockStore {
    fn open(path: &Path, mode: OpenMode) -> Result<Self, FileError> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        if mode == OpenMode::Create {
            options.create_new(true);
        }

        let file = options.open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileError::NotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::AlreadyExists => FileError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => FileError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn get(&self, block_id: BlockID) -> Result<Box<[u8; BLOCK_SZ]>, FileError> {
        let offset = Self::block_offset(block_id)?;

        let mut block = Box::new([0u8; BLOCK_SZ]);
        let mut filled = 0;
        while filled < BLOCK_SZ {
            let n = Self::read_at(&self.file, &mut block[filled..], offset + filled as u64)
                .map_err(|e| self.io_error(e))?;

            // A short file means the block was never allocated.
            if n == 0 {
                return Err(FileError::UnknownBlock { block_id });
            }

            filled += n;
        }

        Ok(block)
    }

    fn put(&mut self, block_id: BlockID, block: &[u8; BLOCK_SZ]) -> Result<(), FileError> {
        let offset = Self::block_offset(block_id)?;

        let mut written = 0;
        while written < BLOCK_SZ {
            let n = Self::write_at(&self.file, &block[written..], offset + written as u64)
                .map_err(|e| self.io_error(e))?;

            if n == 0 {
                return Err(FileError::Io {
                    path: self.path.clone(),
                    source: std::io::Error::new(ErrorKind::WriteZero, "disk wrote 0 bytes"),
                });
            }

            written += n;
        }

        Ok(())
    }

    fn block_count(&self) -> Result<u32, FileError> {
        let len = self
            .file
            .metadata()
            .map_err(|e| self.io_error(e))?
            .len();
        Ok((len / BLOCK_SZ as u64) as u32)
    }

    fn remove(path: &Path) -> Result<(), FileError> {
        fs::remove_file(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileError::NotFound {
                path: path.to_path_buf(),
            },
            _ => FileError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}

impl DiskBlockStore {
    fn block_offset(block_id: BlockID) -> Result<u64, FileError> {
        // Block ids are 1-based; 0 never addresses anything.
        if block_id == 0 {
            return Err(FileError::UnknownBlock { block_id });
        }
        Ok((block_id as u64 - 1) * BLOCK_SZ as u64)
    }

    fn io_error(&self, source: std::io::Error) -> FileError {
        FileError::Io {
            path: self.path.clone(),
            source,
        }
    }

    #[inline]
    fn read_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<usize> {
        #[cfg(unix)]
        {
            file.read_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_read(buf, offset)
        }
    }

    #[inline]
    fn write_at(file: &File, buf: &[u8], offset: u64) -> std::io::Result<usize> {
        #[cfg(unix)]
        {
            file.write_at(buf, offset)
        }

        #[cfg(windows)]
        {
            file.seek_write(buf, offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let result = DiskBlockStore::open(&path, OpenMode::Open);
        assert!(matches!(result, Err(FileError::NotFound { .. })));
    }

    #[test]
    fn create_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        DiskBlockStore::open(&path, OpenMode::Create).unwrap();
        let second = DiskBlockStore::open(&path, OpenMode::Create);
        assert!(matches!(second, Err(FileError::AlreadyExists { .. })));
    }

    #[test]
    fn blocks_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let mut store = DiskBlockStore::open(&path, OpenMode::Create).unwrap();

        let mut block = Box::new([0u8; BLOCK_SZ]);
        block[0] = 0xAA;
        block[BLOCK_SZ - 1] = 0xBB;
        store.put(1, &block).unwrap();

        let read_back = store.get(1).unwrap();
        assert_eq!(read_back[0], 0xAA);
        assert_eq!(read_back[BLOCK_SZ - 1], 0xBB);
        assert_eq!(store.block_count().unwrap(), 1);
    }

    #[test]
    fn get_of_an_unallocated_block_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = DiskBlockStore::open(&path, OpenMode::Create).unwrap();

        assert!(matches!(
            store.get(1),
            Err(FileError::UnknownBlock { block_id: 1 })
        ));
        assert!(matches!(
            store.get(0),
            Err(FileError::UnknownBlock { block_id: 0 })
        ));
    }

    #[test]
    fn remove_deletes_the_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        let store = DiskBlockStore::open(&path, OpenMode::Create).unwrap();
        drop(store);

        DiskBlockStore::remove(&path).unwrap();
        assert!(matches!(
            DiskBlockStore::open(&path, OpenMode::Open),
            Err(FileError::NotFound { .. })
        ));
    }
}
