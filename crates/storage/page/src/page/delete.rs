use crate::block_id::RecordID;
use crate::errors::delete_error::DeleteError;
use crate::page::api::SlottedPage;
use crate::slot::Slot;

impl SlottedPage {
    pub(super) fn delete_internal(&mut self, record_id: RecordID) -> Result<(), DeleteError> {
        let slot = self.slot(record_id)?;

        self.write_slot(record_id, Slot::TOMBSTONE)?;
        self.slide(slot.offset, slot.offset + slot.size)?;

        Ok(())
    }

    /// Closes the gap `[start, end)` left by removed record bytes.
    ///
    /// Everything packed between `end_free + 1` and `start` moves up by
    /// `shift = end - start` (one overlapping move towards the page end),
    /// `end_free` grows by the same amount, and every live slot whose record
    /// sat at or below the gap is patched by the shift. For an already
    /// tombstoned record both bounds are zero and nothing happens.
    pub(super) fn slide(&mut self, start: u16, end: u16) -> Result<(), DeleteError> {
        let shift = end - start;
        if shift == 0 {
            return Ok(());
        }

        let end_free = self.header_ref()?.get_end_free()?;

        let region_start = end_free as usize + 1;
        let region_end = start as usize;
        if region_end > region_start {
            self.data
                .copy_within(region_start..region_end, region_start + shift as usize);
        }

        self.header_mut()?.set_end_free(end_free + shift)?;

        // Patch the slots against the pre-slide offsets they still hold.
        let num_records = self.header_ref()?.get_num_records()?;
        for record_id in 1..=num_records {
            let slot = self.slot(record_id)?;
            if slot.is_tombstone() {
                continue;
            }
            if slot.offset <= start {
                self.write_slot(
                    record_id,
                    Slot {
                        size: slot.size,
                        offset: slot.offset + shift,
                    },
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod delete_tests {
    use crate::BLOCK_SZ;
    use crate::page::api::SlottedPage;

    /// The no-leak invariant: once a delete has compacted the data region,
    /// the live record bytes sit right below the page end with nothing in
    /// between, so end_free plus the live sizes adds back up to the top.
    fn assert_compacted(page: &SlottedPage) {
        let live_total: usize = page
            .ids()
            .unwrap()
            .iter()
            .map(|&id| page.get(id).unwrap().unwrap().len())
            .sum();
        assert_eq!(page.end_free().unwrap() as usize + live_total, BLOCK_SZ - 1);
    }

    #[test]
    fn del_tombstones_the_record() {
        let mut page = SlottedPage::new(1).unwrap();
        let id = page.add(b"short lived").unwrap();

        page.del(id).unwrap();

        assert_eq!(page.get(id).unwrap(), None);
        assert!(page.ids().unwrap().is_empty());
        // num_records keeps counting the tombstone
        assert_eq!(page.num_records().unwrap(), 1);
        assert_compacted(&page);
    }

    #[test]
    fn del_reclaims_the_space() {
        let mut page = SlottedPage::new(1).unwrap();
        let end_free_initial = page.end_free().unwrap();
        let id = page.add(&[9u8; 500]).unwrap();
        page.del(id).unwrap();
        assert_eq!(page.end_free().unwrap(), end_free_initial);
    }

    #[test]
    fn del_of_a_middle_record_slides_the_ones_below_it() {
        let mut page = SlottedPage::new(1).unwrap();
        let id1 = page.add(b"top of the data region").unwrap();
        let id2 = page.add(b"middle").unwrap();
        let id3 = page.add(b"bottom, moves up on delete").unwrap();

        page.del(id2).unwrap();

        assert_eq!(page.get(id1).unwrap().unwrap(), b"top of the data region");
        assert_eq!(page.get(id2).unwrap(), None);
        assert_eq!(
            page.get(id3).unwrap().unwrap(),
            b"bottom, moves up on delete"
        );
        assert_compacted(&page);
    }

    #[test]
    fn del_of_the_bottom_record_keeps_the_others_in_place() {
        let mut page = SlottedPage::new(1).unwrap();
        let id1 = page.add(b"aaaa").unwrap();
        let id2 = page.add(b"bbbb").unwrap();

        page.del(id2).unwrap();

        assert_eq!(page.get(id1).unwrap().unwrap(), b"aaaa");
        assert_compacted(&page);
    }

    #[test]
    fn deleted_ids_are_never_handed_out_again() {
        let mut page = SlottedPage::new(1).unwrap();
        let id1 = page.add(b"one").unwrap();
        page.del(id1).unwrap();

        let id2 = page.add(b"two").unwrap();
        assert_ne!(id1, id2);
        assert_eq!(id2, 2);
        assert_eq!(page.get(id1).unwrap(), None);
        assert_eq!(page.get(id2).unwrap().unwrap(), b"two");
    }

    #[test]
    fn del_of_a_tombstone_is_a_no_op() {
        let mut page = SlottedPage::new(1).unwrap();
        let id1 = page.add(b"left alone").unwrap();
        let id2 = page.add(b"doomed").unwrap();

        page.del(id2).unwrap();
        page.del(id2).unwrap();

        assert_eq!(page.get(id1).unwrap().unwrap(), b"left alone");
        assert_compacted(&page);
    }

    #[test]
    fn del_of_an_unknown_id_is_an_error() {
        let mut page = SlottedPage::new(1).unwrap();
        assert!(page.del(1).unwrap_err().is_unknown_record());
    }

    #[test]
    fn interleaved_adds_and_deletes_keep_every_survivor_intact() {
        let mut page = SlottedPage::new(1).unwrap();
        let mut live: Vec<(u16, Vec<u8>)> = Vec::new();

        for round in 0u8..20 {
            let record = vec![round; 7 + round as usize];
            let id = page.add(&record).unwrap();
            live.push((id, record));

            // Delete every third record to churn the data region.
            if round % 3 == 2 {
                let (id, _) = live.remove(live.len() / 2);
                page.del(id).unwrap();
            }

            for (id, expected) in &live {
                assert_eq!(page.get(*id).unwrap().unwrap(), *expected);
            }
            assert_compacted(&page);
        }
    }
}
