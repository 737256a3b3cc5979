//! Slot Array Handling for Slotted Pages
//! -------------------------------------
//!
//! This module provides immutable and mutable views (`SlotArrayRef` and
//! `SlotArrayMut`) into the *slot array region* of a slotted page. The slot
//! array is a compact structure of fixed-size slots, each describing the
//! size and offset of a record stored elsewhere on the page.
//!
//! # Forward (Left-to-Right) Slot Ordering
//!
//! The slot array begins right after the page header (which is itself slot 0
//! of the page) and grows **toward the end of the page**, while record data
//! grows from the end of the page toward the front. Record ids are 1-based:
//! the header occupies the id-0 position, so record id `r` lives at byte
//! offset `4 * r` of the page, which is offset `4 * (r - 1)` of the slot
//! array region viewed here.
//!
//! ```text
//!   [header]  [slot 1]  [slot 2]  ...  [slot num_records]
//!      0         4         8                4*num_records
//! ```
//!
//! Allocating a record extends the array by one slot at the right edge;
//! deleting a record leaves its slot in place as a tombstone so ids are
//! never reused.
//!
//! # Access Model
//!
//! The array types borrow their region of the page (`&[u8]` / `&mut [u8]`)
//! and exchange whole [`Slot`] values with callers: reads hand out a decoded
//! copy, writes encode a complete entry into place. The module performs
//! strict length and bounds verification at construction, ensuring the
//! provided byte region is exactly `num_records * SLOT_SIZE`.

use crate::errors::slot_error::SlotError;
use crate::slot::{SLOT_SIZE, Slot};
use std::ops::Range;

/// Immutable view into the slot array of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayRef<'a> {
    /// View into the raw bytes of the slot array (header excluded).
    /// Each slot is of length `SLOT_SIZE` bytes.
    bytes: &'a [u8],
}

impl<'a> SlotArrayRef<'a> {
    /// Creates a new SlotArrayRef.
    /// Validates that the slice length matches the expected record count.
    pub(crate) fn new(bytes: &'a [u8], num_records: u16) -> Result<Self, SlotError> {
        let expected_len = num_records as usize * SLOT_SIZE;

        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Decodes the slot for the given record id.
    /// Record ids are 1-based.
    /// Returns an error if the id is zero or beyond the allocated slots.
    pub(crate) fn slot(&self, record_id: u16) -> Result<Slot, SlotError> {
        let range = slot_range(self.bytes.len(), record_id)?;

        let window = self
            .bytes
            .get(range)
            .ok_or(SlotError::InvalidRecord { record_id })?;

        Slot::read(window)
    }
}

/// Mutable view into the slot array of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayMut<'a> {
    /// View into the raw bytes of the slot array (header excluded).
    /// Each slot is of length `SLOT_SIZE` bytes.
    bytes: &'a mut [u8],
}

impl<'a> SlotArrayMut<'a> {
    /// Creates a new SlotArrayMut.
    /// Validates that the slice length matches the expected record count.
    pub(crate) fn new(bytes: &'a mut [u8], num_records: u16) -> Result<Self, SlotError> {
        let expected_len = num_records as usize * SLOT_SIZE;

        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }

        Ok(Self { bytes })
    }

    /// Encodes a complete entry into the slot for the given record id.
    /// Record ids are 1-based.
    /// Returns an error if the id is zero or beyond the allocated slots.
    pub(crate) fn write_slot(&mut self, record_id: u16, slot: Slot) -> Result<(), SlotError> {
        let range = slot_range(self.bytes.len(), record_id)?;

        let window = self
            .bytes
            .get_mut(range)
            .ok_or(SlotError::InvalidRecord { record_id })?;

        slot.write(window)
    }
}

fn slot_start(slot_array_size: usize, record_id: u16) -> Result<usize, SlotError> {
    // Id 0 is the header, not an addressable record.
    if record_id == 0 {
        return Err(SlotError::InvalidRecord { record_id });
    }

    let start = (record_id as usize - 1) * SLOT_SIZE;
    if start + SLOT_SIZE > slot_array_size {
        return Err(SlotError::InvalidRecord { record_id });
    }

    Ok(start)
}

fn slot_range(slot_array_size: usize, record_id: u16) -> Result<Range<usize>, SlotError> {
    let start = slot_start(slot_array_size, record_id)?;
    Ok(start..(start + SLOT_SIZE))
}
