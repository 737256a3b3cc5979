use crate::BLOCK_SZ;
use crate::block_id::BlockID;
use crate::errors::header_error::HeaderError;
use crate::page::api::SlottedPage;

/// Internal methods for creating and initializing pages.
impl SlottedPage {
    /// Creates a new page with all bytes initialized to zero.
    pub(crate) fn new_zeroed(block_id: BlockID) -> Self {
        Self {
            block_id,
            data: Box::new([0; BLOCK_SZ]),
        }
    }

    /// Creates a new empty page with the header reset for a fresh block.
    pub(crate) fn new_initialized(block_id: BlockID) -> Result<Self, HeaderError> {
        let mut page = Self::new_zeroed(block_id);

        page.header_mut()?.reset()?;

        Ok(page)
    }

    /// Creates a new page from an existing byte array.
    pub(crate) fn new_from_bytes(data: Box<[u8; BLOCK_SZ]>, block_id: BlockID) -> Self {
        Self { block_id, data }
    }
}
