use page::{BlockID, PageError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file {} already exists", path.display())]
    AlreadyExists { path: PathBuf },
    #[error("file {} not found", path.display())]
    NotFound { path: PathBuf },
    #[error("block {block_id} is not in the store")]
    UnknownBlock { block_id: BlockID },
    #[error("heap file is closed")]
    Closed,
    #[error("i/o failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("page initialization failed")]
    Page(#[from] PageError),
}
