use crate::block_id::BlockID;
use crate::errors::add_error::AddError;
use crate::errors::page_op_error::PageOpError;
use crate::errors::slot_error::SlotError;
use crate::errors::update_error::UpdateError;

/// Public facing error type returned by the page module.
#[derive(Debug, thiserror::Error)]
#[error("error on block {block_id}: {source}")]
pub struct PageError {
    /// The block on which the error occurred
    pub(crate) block_id: BlockID,
    /// The source error
    pub(crate) source: PageOpError,
}

/// Public facing result type of page operations.
pub type PageResult<T> = Result<T, PageError>;

impl PageError {
    /// The block the failed operation was performed on.
    pub fn block_id(&self) -> BlockID {
        self.block_id
    }

    /// True when the operation failed because the page has no room left for
    /// the record. Callers use this to fall back to allocating a fresh block.
    pub fn is_no_room(&self) -> bool {
        matches!(
            self.source,
            PageOpError::Add(AddError::NoRoom { .. })
                | PageOpError::Update(UpdateError::NoRoom { .. })
        )
    }

    /// True when the operation addressed a record id that was never allocated
    /// on the page. This is an integrity error for direct callers.
    pub fn is_unknown_record(&self) -> bool {
        fn is_invalid(slot_error: &SlotError) -> bool {
            matches!(slot_error, SlotError::InvalidRecord { .. })
        }

        match &self.source {
            PageOpError::Slot(e) => is_invalid(e),
            PageOpError::Read(crate::errors::read_error::ReadError::SlotError(e)) => is_invalid(e),
            PageOpError::Add(AddError::SlotError(e)) => is_invalid(e),
            PageOpError::Update(UpdateError::SlotError(e)) => is_invalid(e),
            PageOpError::Delete(crate::errors::delete_error::DeleteError::SlotError(e)) => {
                is_invalid(e)
            }
            _ => false,
        }
    }
}

/// Helper trait to attach block_id context when surfacing errors.
pub(crate) trait WithBlockId<T> {
    fn with_block_id(self, block_id: BlockID) -> PageResult<T>;
}

impl<T> WithBlockId<T> for Result<T, PageOpError> {
    fn with_block_id(self, block_id: BlockID) -> PageResult<T> {
        self.map_err(|source| PageError { block_id, source })
    }
}
