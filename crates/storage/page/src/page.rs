//! Module defining a fixed-size slotted page structure with its associated methods.
//!
//! # Memory Layout Overview
//!
//! A slotted page is one 4096-byte block interpreted like this:
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │ Page Header = slot 0 (num_records, end_free)                  │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Slot Array Region (grows forward)                             │
//!   │   fixed-size SLOT_SIZE entries, one per record id             │
//!   │   slot r describes record r (ids start at 1)                  │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Free Space                                                    │
//!   ├───────────────────────────────────────────────────────────────┤
//!   │ Record Data Region (grows backward from the page end)         │
//!   │   variable sized, packed without gaps                         │
//!   └───────────────────────────────────────────────────────────────┘
//!
//!                     ↑ page_start                        page_end ↑
//! ```
//!
//! # Why This Design?
//!
//! - Record ids are **stable**: a slot is never reused, deletion leaves a
//!   `(0, 0)` tombstone, and replacement re-writes the same slot. Handles
//!   held by callers survive any interleaving of operations on other records.
//! - Deletion compacts the data region immediately (see `slide`), so the
//!   free space never fragments and `end_free` alone describes it.
//! - Adding a record touches one slot, the header, and the record bytes.
//!
//! Header access is provided via `header::HeaderRef` and `header::HeaderMut` types.
//! Slot array access is provided via `slot_array::SlotArrayRef` and `slot_array::SlotArrayMut` types.

pub(crate) mod add;
pub(crate) mod ctors;
pub(crate) mod delete;
pub(crate) mod internal;
pub(crate) mod read;
pub(crate) mod update;

/// Public API for the `SlottedPage` struct
pub mod api;
