use crate::value::DataType;
use file::FileError;
use page::PageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelationError {
    #[error("row is missing declared column '{column}'")]
    MissingColumn { column: String },
    #[error("value for column '{column}' does not match its declared {expected} type")]
    TypeMismatch { column: String, expected: DataType },
    #[error("text value for column '{column}' is {len} bytes, longer than a length prefix can hold")]
    TextTooLong { column: String, len: usize },
    #[error("marshalled row is {size} bytes, larger than one block")]
    RowTooLarge { size: usize },
    #[error("record ({}, {}) does not exist", handle.0, handle.1)]
    NoSuchRecord { handle: (u32, u16) },
    #[error("stored row bytes are truncated")]
    TruncatedRow,
    #[error("stored text is not valid ascii")]
    InvalidText,
    #[error("'{found}' is not a known data type")]
    UnknownDataType { found: String },
    #[error(transparent)]
    File(#[from] FileError),
    #[error(transparent)]
    Page(#[from] PageError),
}
