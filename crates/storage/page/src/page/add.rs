use crate::block_id::RecordID;
use crate::errors::add_error::AddError;
use crate::page::api::SlottedPage;
use crate::slot::Slot;
use binary_helpers::conversions::UsizeConversion;

impl SlottedPage {
    pub(super) fn add_internal(&mut self, record: &[u8]) -> Result<RecordID, AddError> {
        let available = self.available_room()?;
        if record.len() > available {
            return Err(AddError::NoRoom {
                needed: record.len(),
                available,
            });
        }

        let (num_records, end_free) = {
            let header = self.header_ref()?;
            (header.get_num_records()?, header.get_end_free()?)
        };

        // The next id is always a fresh one: tombstoned slots keep counting
        // towards num_records, so ids are never reused.
        let record_id = num_records + 1;
        let size = record.len().to_u16()?;
        let new_end_free = end_free - size;
        let offset = new_end_free + 1;

        {
            let mut header = self.header_mut()?;
            header.set_num_records(record_id)?;
            header.set_end_free(new_end_free)?;
        }

        self.data[offset as usize..offset as usize + record.len()].copy_from_slice(record);
        self.write_slot(record_id, Slot { size, offset })?;

        Ok(record_id)
    }
}

#[cfg(test)]
mod add_tests {
    use crate::page::api::SlottedPage;
    use crate::slot::SLOT_SIZE;

    #[test]
    fn add_assigns_ascending_ids_starting_at_one() {
        let mut page = SlottedPage::new(1).unwrap();
        assert_eq!(page.add(b"first").unwrap(), 1);
        assert_eq!(page.add(b"second").unwrap(), 2);
        assert_eq!(page.add(b"third").unwrap(), 3);
        assert_eq!(page.num_records().unwrap(), 3);
    }

    #[test]
    fn add_packs_records_from_the_page_end() {
        let mut page = SlottedPage::new(1).unwrap();
        let end_free_before = page.end_free().unwrap();
        page.add(&[1u8; 10]).unwrap();
        assert_eq!(page.end_free().unwrap(), end_free_before - 10);
        page.add(&[2u8; 20]).unwrap();
        assert_eq!(page.end_free().unwrap(), end_free_before - 30);
    }

    #[test]
    fn added_records_read_back_verbatim() {
        let mut page = SlottedPage::new(1).unwrap();
        let id1 = page.add(b"hello").unwrap();
        let id2 = page.add(b"world!").unwrap();
        assert_eq!(page.get(id1).unwrap().unwrap(), b"hello");
        assert_eq!(page.get(id2).unwrap().unwrap(), b"world!");
    }

    #[test]
    fn add_fails_with_no_room_when_the_record_does_not_fit() {
        let mut page = SlottedPage::new(1).unwrap();
        let result = page.add(&[0u8; 5000]);
        let err = result.unwrap_err();
        assert!(err.is_no_room());
        assert_eq!(err.block_id(), 1);
    }

    #[test]
    fn page_fills_up_after_enough_records() {
        let mut page = SlottedPage::new(1).unwrap();
        let mut added = 0usize;
        loop {
            match page.add(&[0xAB; 100]) {
                Ok(_) => added += 1,
                Err(e) => {
                    assert!(e.is_no_room());
                    break;
                }
            }
        }
        // 100 data bytes + one slot per record out of a 4096-byte block
        assert_eq!(added, (4096 - 1 - SLOT_SIZE) / (100 + SLOT_SIZE));
        // A smaller record can still squeeze in afterwards.
        page.add(&[0xCD; 10]).unwrap();
    }

    #[test]
    fn add_accepts_an_empty_record() {
        let mut page = SlottedPage::new(1).unwrap();
        let id = page.add(b"").unwrap();
        assert_eq!(page.get(id).unwrap().unwrap(), Vec::<u8>::new());
    }
}
