use crate::block_id::RecordID;
use crate::errors::update_error::UpdateError;
use crate::page::api::SlottedPage;
use crate::slot::Slot;
use binary_helpers::conversions::UsizeConversion;

impl SlottedPage {
    pub(super) fn update_internal(
        &mut self,
        record_id: RecordID,
        record: &[u8],
    ) -> Result<(), UpdateError> {
        // Validates the id as a side effect.
        let old = self.slot(record_id)?;

        let available = self.available_room()?;
        let new_size = record.len();
        if new_size > old.size as usize && new_size - old.size as usize > available {
            return Err(UpdateError::NoRoom {
                needed: new_size - old.size as usize,
                available,
            });
        }

        // Delete-then-append: reclaim the old bytes first, then place the new
        // ones at the top of the free region. The slot is re-written with the
        // same id, so num_records stays put and handles remain valid.
        if old.size != 0 {
            self.delete_internal(record_id)?;
        }

        let end_free = self.header_ref()?.get_end_free()?;
        let size = new_size.to_u16()?;
        let new_end_free = end_free - size;
        let offset = new_end_free + 1;

        self.header_mut()?.set_end_free(new_end_free)?;
        self.data[offset as usize..offset as usize + new_size].copy_from_slice(record);
        self.write_slot(record_id, Slot { size, offset })?;

        Ok(())
    }
}
