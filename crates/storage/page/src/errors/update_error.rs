use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use binary_helpers::conversions::ConversionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum UpdateError {
    #[error("Not enough room to grow a record by {needed} bytes with {available} free bytes")]
    NoRoom {
        /// Number of extra bytes the replacement record requires
        needed: usize,
        /// Actual number of free bytes in the page
        available: usize,
    },
    #[error("Error while accessing slot array")]
    SlotError(#[from] SlotError),
    #[error("Error while accessing header")]
    HeaderError(#[from] HeaderError),
    #[error("Error while deleting the old record")]
    DeleteError(#[from] DeleteError),
    #[error("Error while converting between data types")]
    ConversionError(#[from] ConversionError),
}
