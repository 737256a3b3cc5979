use thiserror::Error;

/// Checked narrowing from the `usize` world of slices and lengths into the
/// `u16` fields the disk format stores.
pub trait UsizeConversion {
    fn to_u16(self) -> Result<u16, ConversionError>;
}

impl UsizeConversion for usize {
    fn to_u16(self) -> Result<u16, ConversionError> {
        u16::try_from(self).map_err(|_| ConversionError::Overflow)
    }
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("value is too large for the on-disk field width")]
    Overflow,
}
