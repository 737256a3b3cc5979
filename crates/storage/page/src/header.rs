//! Module defining the layout and accessors for the page header in a slotted page.
//!
//! # Page Header Layout
//!
//! The page header occupies the first **4 bytes** of every slotted page: it
//! is slot 0 of the slot array, reinterpreted. Both fields are stored in
//! **little-endian** binary format.
//!
//! | Field         | Type | Offset | Description |
//! |---------------|------|--------|-------------|
//! | `num_records` | u16  | [`NUM_RECORDS`] | Highest record id ever handed out on this page. Tombstoned records still count. |
//! | `end_free`    | u16  | [`END_FREE`]    | Offset of the last free byte. Record data lives strictly above it. |
//!
//! ## Memory Diagram
//!
//! ```text
//! +-------------+--------------------+-------------+----------------------+
//! |  Header     |     Slot Array     | Free Space  |     Record Data      |
//! |  (slot 0)   |   (grows right)    |             |  (packed from end)   |
//! +-------------+--------------------+-------------+----------------------+
//! 0             4                                  end_free        BLOCK_SZ
//! ```
//!
//! Each constant below defines the byte offset where its corresponding field
//! is stored within the header.

use crate::BLOCK_SZ;
use crate::errors::header_error::HeaderError;
use binary_helpers::le::{read_le, write_le};
use paste::paste;

/// Size of the header in bytes. The header is slot 0 of the page.
pub const HEADER_SIZE: usize = 4;

/// The `HeaderRef` struct provides an immutable view into the header of a page.
#[derive(Debug)]
pub struct HeaderRef<'a> {
    bytes: &'a [u8; HEADER_SIZE],
}

impl<'a> HeaderRef<'a> {
    /// Creates a new `HeaderRef` from a slice of bytes if it matches the required size.
    pub(crate) fn new(bytes: &'a [u8]) -> Result<Self, HeaderError> {
        let bytes: &[u8; HEADER_SIZE] =
            bytes
                .try_into()
                .map_err(|_| HeaderError::HeaderSliceSizeMismatch {
                    actual: bytes.len(),
                    expected: HEADER_SIZE,
                })?;
        Ok(HeaderRef { bytes })
    }
}

/// The `HeaderMut` struct provides a mutable view into the header of a page.
#[derive(Debug)]
pub struct HeaderMut<'a> {
    bytes: &'a mut [u8; HEADER_SIZE],
}

impl<'a> HeaderMut<'a> {
    /// Creates a new `HeaderMut` from a slice of bytes if it matches the required size.
    pub(crate) fn new(bytes: &'a mut [u8]) -> Result<Self, HeaderError> {
        let actual = bytes.len();
        let bytes: &mut [u8; HEADER_SIZE] = bytes
            .try_into()
            .map_err(|_| HeaderError::HeaderSliceSizeMismatch {
                actual,
                expected: HEADER_SIZE,
            })?;
        Ok(HeaderMut { bytes })
    }

    /// Resets the header for a freshly allocated page: no records yet, the
    /// whole area above the header is free.
    pub(crate) fn reset(&mut self) -> Result<(), HeaderError> {
        self.set_num_records(0)?;
        self.set_end_free((BLOCK_SZ - 1) as u16)?;
        Ok(())
    }
}

/// Defines header field constants and getter/setter methods.
///
/// Pattern: `field_id(identifier): field_type(type) = field_offset(usize)`
macro_rules! impl_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                #[doc = concat!("Offset of ", stringify!($field_name), ", type ", stringify!($field_type))]
                pub const [<$field_name:upper>] : usize = $field_offset;

                impl<'a> HeaderRef<'a> {
                    #[doc = concat!(
                        "Getter for field `", stringify!($field_name), "`.\n",
                        "Type: `", stringify!($field_type), "`.\n",
                        "Offset: ", stringify!($field_offset), "."
                    )]
                    pub fn [<get_ $field_name>](&self)
                        -> Result<$field_type, HeaderError>
                    {
                        Ok(read_le::<$field_type>(self.bytes, $field_offset)?)
                    }
                }

                impl<'a> HeaderMut<'a> {
                    #[doc = concat!(
                        "Setter for field `", stringify!($field_name), "`.\n",
                        "Type: `", stringify!($field_type), "`.\n",
                        "Offset: ", stringify!($field_offset), "."
                    )]
                    pub fn [<set_ $field_name>](&mut self, val: $field_type)
                        -> Result<(), HeaderError>
                    {
                        write_le::<$field_type>(self.bytes, $field_offset, val)?;
                        Ok(())
                    }
                }
            )*
        }
    };
}

impl_header_accessors! {
    num_records : u16 = 0;
    end_free    : u16 = 2;
}
