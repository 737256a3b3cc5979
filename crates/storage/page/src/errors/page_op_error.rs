use crate::errors::add_error::AddError;
use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::read_error::ReadError;
use crate::errors::slot_error::SlotError;
use crate::errors::update_error::UpdateError;
use thiserror::Error;

/// Aggregator error type for all possible page related sub-errors
#[derive(Debug, Error)]
pub(crate) enum PageOpError {
    #[error("Error while accessing header")]
    Header(#[from] HeaderError),
    #[error("Error while accessing slot array")]
    Slot(#[from] SlotError),
    #[error("Error while reading record")]
    Read(#[from] ReadError),
    #[error("Error while appending record")]
    Add(#[from] AddError),
    #[error("Error while replacing record")]
    Update(#[from] UpdateError),
    #[error("Error while deleting record")]
    Delete(#[from] DeleteError),
}
