use crate::BLOCK_SZ;
use crate::block_id::{BlockID, RecordID};
use crate::errors::page_error::{PageResult, WithBlockId};
use crate::errors::page_op_error::PageOpError;

/// Wrapper around a fixed-size byte array representing one block interpreted
/// as a slotted page.
#[derive(Debug)]
pub struct SlottedPage {
    /// Identifier of the block this page overlays.
    pub(crate) block_id: BlockID,
    /// Main binary array holding the `BLOCK_SZ` bytes of data for the page. Boxed and owned by this struct.
    pub(crate) data: Box<[u8; BLOCK_SZ]>,
}

/// Public APIs for the SlottedPage struct.
/// All public APIs use the `PageResult` type
impl SlottedPage {
    /// Creates a fresh page for a newly allocated block: all bytes zeroed and
    /// the header initialized to an empty record map.
    pub fn new(block_id: BlockID) -> PageResult<Self> {
        Self::new_initialized(block_id)
            .map_err(PageOpError::from)
            .with_block_id(block_id)
    }

    /// Overlays a page on a block read back from storage. The header is
    /// whatever the block bytes say it is.
    pub fn from_bytes(data: Box<[u8; BLOCK_SZ]>, block_id: BlockID) -> Self {
        Self::new_from_bytes(data, block_id)
    }

    /// Adds a new record to the page and returns its id.
    ///
    /// # Arguments
    ///
    /// * `record` - The record bytes to store. Records are opaque to the page.
    ///
    /// # Returns
    ///
    /// * `PageResult<RecordID>` - The id assigned to the record. Ids start at
    ///   1 and are never handed out twice on the same page.
    ///
    /// # Errors
    ///
    /// * `PageError` - In particular the no-room condition when the record
    ///   plus its slot does not fit in the free region; callers can detect it
    ///   via [`crate::PageError::is_no_room`] and allocate another block.
    pub fn add(&mut self, record: &[u8]) -> PageResult<RecordID> {
        self.add_internal(record)
            .map_err(PageOpError::from)
            .with_block_id(self.block_id)
    }

    /// Retrieves a record from the page by its id.
    ///
    /// # Arguments
    ///
    /// * `record_id` - The id returned by [`SlottedPage::add`].
    ///
    /// # Returns
    ///
    /// * `PageResult<Option<Vec<u8>>>` - The record bytes, or `None` if the
    ///   record was deleted (its slot is a tombstone).
    ///
    /// # Errors
    ///
    /// * `PageError` - If the id was never allocated on this page.
    pub fn get(&self, record_id: RecordID) -> PageResult<Option<Vec<u8>>> {
        self.read_internal(record_id)
            .map_err(PageOpError::from)
            .with_block_id(self.block_id)
    }

    /// Replaces the contents of a record, keeping its id stable.
    ///
    /// The replacement is delete-then-append: the old bytes are removed (with
    /// compaction), the new bytes are placed at the top of the free region,
    /// and the same slot is re-written. `num_records` does not change.
    ///
    /// # Arguments
    ///
    /// * `record_id` - The id of the record being replaced.
    /// * `record` - The new record bytes; may be smaller or larger than the
    ///   old ones.
    ///
    /// # Errors
    ///
    /// * `PageError` - If the id was never allocated, or the growth does not
    ///   fit the free region (no-room, detectable via
    ///   [`crate::PageError::is_no_room`]).
    pub fn put(&mut self, record_id: RecordID, record: &[u8]) -> PageResult<()> {
        self.update_internal(record_id, record)
            .map_err(PageOpError::from)
            .with_block_id(self.block_id)
    }

    /// Deletes a record, tombstoning its slot and compacting the data region.
    ///
    /// The id is retired: it will never be returned by a later
    /// [`SlottedPage::add`], and [`SlottedPage::get`] returns `None` for it
    /// from now on. Deleting an already tombstoned record is a no-op.
    ///
    /// # Errors
    ///
    /// * `PageError` - If the id was never allocated on this page.
    pub fn del(&mut self, record_id: RecordID) -> PageResult<()> {
        self.delete_internal(record_id)
            .map_err(PageOpError::from)
            .with_block_id(self.block_id)
    }

    /// Returns the ids of all live records in ascending order, skipping
    /// tombstones.
    pub fn ids(&self) -> PageResult<Vec<RecordID>> {
        self.ids_internal()
            .map_err(PageOpError::from)
            .with_block_id(self.block_id)
    }

    /// Number of record ids ever allocated on this page (tombstones included).
    pub fn num_records(&self) -> PageResult<u16> {
        let result = self.header_ref().and_then(|h| h.get_num_records());
        result.map_err(PageOpError::from).with_block_id(self.block_id)
    }

    /// Offset of the last free byte; record data lives strictly above it.
    pub fn end_free(&self) -> PageResult<u16> {
        let result = self.header_ref().and_then(|h| h.get_end_free());
        result.map_err(PageOpError::from).with_block_id(self.block_id)
    }

    /// The block this page overlays.
    pub fn block_id(&self) -> BlockID {
        self.block_id
    }

    /// Returns an immutable reference to the underlying data of the page.
    pub fn data(&self) -> &[u8; BLOCK_SZ] {
        &self.data
    }
}
