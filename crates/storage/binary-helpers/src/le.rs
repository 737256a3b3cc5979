//! Little-endian integer access into raw block and row buffers.
//!
//! Every multi-byte number the engine persists passes through this module,
//! so the on-disk byte order is decided in exactly one place. The menu of
//! widths is deliberately short: `u16` covers page header fields, slot
//! entries and text lengths, `u32` covers block ids, and `i32` covers row
//! integers.

use crate::bin_error::BinaryError;

/// An integer with a fixed width in the on-disk format, always stored
/// little-endian.
pub trait FixedInt: Sized + Copy {
    /// On-disk width in bytes.
    const WIDTH: usize;

    /// Decodes a value from a window of exactly [`FixedInt::WIDTH`] bytes.
    fn decode(window: &[u8]) -> Result<Self, BinaryError>;

    /// Encodes the value into a window of exactly [`FixedInt::WIDTH`] bytes.
    fn encode(self, window: &mut [u8]) -> Result<(), BinaryError>;
}

macro_rules! fixed_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedInt for $ty {
                const WIDTH: usize = size_of::<$ty>();

                fn decode(window: &[u8]) -> Result<Self, BinaryError> {
                    // The window must match the width exactly; a mismatch is
                    // a bookkeeping bug in the caller's offset math.
                    let raw: [u8; size_of::<$ty>()] =
                        window
                            .try_into()
                            .map_err(|_| BinaryError::WindowSizeMismatch {
                                wanted: Self::WIDTH,
                                got: window.len(),
                            })?;
                    Ok(<$ty>::from_le_bytes(raw))
                }

                fn encode(self, window: &mut [u8]) -> Result<(), BinaryError> {
                    if window.len() != Self::WIDTH {
                        return Err(BinaryError::WindowSizeMismatch {
                            wanted: Self::WIDTH,
                            got: window.len(),
                        });
                    }
                    window.copy_from_slice(&self.to_le_bytes());
                    Ok(())
                }
            }
        )*
    };
}

fixed_int!(u16, u32, i32);

/// Reads the `T` stored at `offset` within `bytes`.
pub fn read_le<T: FixedInt>(bytes: &[u8], offset: usize) -> Result<T, BinaryError> {
    let window = bytes
        .get(offset..offset + T::WIDTH)
        .ok_or(BinaryError::OutOfRange {
            width: T::WIDTH,
            offset,
        })?;
    T::decode(window)
}

/// Stores `value` at `offset` within `bytes`.
pub fn write_le<T: FixedInt>(
    bytes: &mut [u8],
    offset: usize,
    value: T,
) -> Result<(), BinaryError> {
    let window = bytes
        .get_mut(offset..offset + T::WIDTH)
        .ok_or(BinaryError::OutOfRange {
            width: T::WIDTH,
            offset,
        })?;
    value.encode(window)
}

#[cfg(test)]
mod round_trip_tests {
    use super::*;

    #[test]
    fn u16_survives_a_round_trip() {
        let mut buffer = [0u8; 2];
        write_le::<u16>(&mut buffer, 0, 4095).unwrap();
        assert_eq!(buffer, 4095u16.to_le_bytes());
        assert_eq!(read_le::<u16>(&buffer, 0).unwrap(), 4095);
    }

    #[test]
    fn values_land_at_the_requested_offset() {
        let mut buffer = [0u8; 8];
        write_le::<u16>(&mut buffer, 4, 23).unwrap();
        assert_eq!(buffer, [0, 0, 0, 0, 0x17, 0, 0, 0]);
        assert_eq!(read_le::<u16>(&buffer, 4).unwrap(), 23);
    }

    #[test]
    fn u32_block_ids_round_trip() {
        let mut buffer = [0u8; 4];
        write_le::<u32>(&mut buffer, 0, 70_000).unwrap();
        assert_eq!(read_le::<u32>(&buffer, 0).unwrap(), 70_000);
    }

    #[test]
    fn i32_keeps_its_sign() {
        let mut buffer = [0u8; 6];
        write_le::<i32>(&mut buffer, 2, -90_210).unwrap();
        assert_eq!(read_le::<i32>(&buffer, 2).unwrap(), -90_210);
    }

    #[test]
    fn widths_match_the_native_sizes() {
        assert_eq!(u16::WIDTH, 2);
        assert_eq!(u32::WIDTH, 4);
        assert_eq!(i32::WIDTH, 4);
    }
}
