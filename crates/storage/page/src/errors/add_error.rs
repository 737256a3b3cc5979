use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use binary_helpers::conversions::ConversionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AddError {
    #[error("Not enough room for a {needed}-byte record with {available} free bytes")]
    NoRoom {
        /// Number of bytes required to place the record
        needed: usize,
        /// Actual number of free bytes in the page
        available: usize,
    },
    #[error("Error while accessing slot array")]
    SlotError(#[from] SlotError),
    #[error("Error while accessing header")]
    HeaderError(#[from] HeaderError),
    #[error("Error while converting between data types")]
    ConversionError(#[from] ConversionError),
}
