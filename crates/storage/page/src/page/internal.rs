use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use crate::header::{HEADER_SIZE, HeaderMut, HeaderRef};
use crate::page::api::SlottedPage;
use crate::slot::{SLOT_SIZE, Slot};
use crate::slot_array::{SlotArrayMut, SlotArrayRef};

/// Internal methods for the `SlottedPage` struct.
impl SlottedPage {
    /// Returns a read-only view of the page header.
    #[inline]
    pub(crate) fn header_ref(&'_ self) -> Result<HeaderRef<'_>, HeaderError> {
        HeaderRef::new(&self.data[..HEADER_SIZE])
    }

    /// Returns a mutable view of the page header.
    #[inline]
    pub(crate) fn header_mut(&'_ mut self) -> Result<HeaderMut<'_>, HeaderError> {
        HeaderMut::new(&mut self.data[..HEADER_SIZE])
    }

    /// Returns an immutable view of the slot array (header excluded).
    #[inline]
    pub(crate) fn slot_array_ref(&'_ self) -> Result<SlotArrayRef<'_>, SlotError> {
        let num_records = self.header_ref()?.get_num_records()?;
        let expected_size = num_records as usize * SLOT_SIZE;
        // A corrupt num_records could claim more slots than the block holds.
        let region = self
            .data
            .get(HEADER_SIZE..HEADER_SIZE + expected_size)
            .ok_or(SlotError::SlotRegionSizeMismatch {
                expected_size,
                actual_size: self.data.len() - HEADER_SIZE,
            })?;
        SlotArrayRef::new(region, num_records)
    }

    /// Returns a mutable view of the slot array (header excluded).
    pub(crate) fn slot_array_mut(&'_ mut self) -> Result<SlotArrayMut<'_>, SlotError> {
        let num_records = self.header_ref()?.get_num_records()?;
        let expected_size = num_records as usize * SLOT_SIZE;
        let actual_size = self.data.len() - HEADER_SIZE;
        let region = self
            .data
            .get_mut(HEADER_SIZE..HEADER_SIZE + expected_size)
            .ok_or(SlotError::SlotRegionSizeMismatch {
                expected_size,
                actual_size,
            })?;
        SlotArrayMut::new(region, num_records)
    }

    /// Decodes the slot of a record, validating the id against the
    /// allocated range.
    pub(super) fn slot(&self, record_id: u16) -> Result<Slot, SlotError> {
        self.slot_array_ref()?.slot(record_id)
    }

    /// Encodes a complete slot entry for a record.
    pub(super) fn write_slot(&mut self, record_id: u16, slot: Slot) -> Result<(), SlotError> {
        self.slot_array_mut()?.write_slot(record_id, slot)
    }

    /// Bytes available for one more record. The figure reserves the slot the
    /// next record would need, matching the append room check.
    pub(super) fn available_room(&self) -> Result<usize, HeaderError> {
        let header = self.header_ref()?;
        let num_records = header.get_num_records()? as usize;
        let end_free = header.get_end_free()? as usize;
        Ok(end_free.saturating_sub(SLOT_SIZE * (num_records + 1)))
    }
}

#[cfg(test)]
mod internal_tests {
    use super::*;
    use crate::BLOCK_SZ;

    // region Available room
    #[test]
    fn empty_page_has_almost_the_whole_block_free() {
        let page = SlottedPage::new(1).unwrap();
        assert_eq!(page.available_room().unwrap(), BLOCK_SZ - 1 - SLOT_SIZE);
    }

    #[test]
    fn room_shrinks_by_record_size_plus_slot() {
        let mut page = SlottedPage::new(1).unwrap();
        let before = page.available_room().unwrap();
        page.add(&[7u8; 100]).unwrap();
        assert_eq!(page.available_room().unwrap(), before - 100 - SLOT_SIZE);
    }
    // endregion

    // region Slot array
    #[test]
    fn slot_array_corrupted_header_returns_error() {
        let mut page = SlottedPage::new(1).unwrap();
        // Claim more slots than the page could hold below end_free
        page.header_mut().unwrap().set_num_records(2000).unwrap();
        page.header_mut().unwrap().set_end_free(10).unwrap();

        // The region is still constructed from num_records; the entry beyond
        // the data end must be rejected on access.
        let result = page.slot(2000);
        assert!(result.is_err());
    }
    // endregion
}
