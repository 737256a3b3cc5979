//! The binary row format.
//!
//! A row is marshalled column by column in declared order:
//!
//! | Type    | Encoding                                      |
//! |---------|-----------------------------------------------|
//! | INT     | 4 bytes, i32 little-endian                    |
//! | TEXT    | u16 little-endian length *n*, then *n* bytes  |
//! | BOOLEAN | 1 byte, 0 or 1                                |
//!
//! Text is assumed ascii. A marshalled row must fit in one block.

use crate::relation_error::RelationError;
use crate::value::{DataType, Row, Value};
use binary_helpers::conversions::UsizeConversion;
use binary_helpers::le::{FixedInt, read_le};
use page::BLOCK_SZ;

/// Converts a row mapping into its on-disk bytes, following the declared
/// column order. Every declared column must be present with a value of the
/// declared type.
pub(crate) fn marshal(
    row: &Row,
    column_names: &[String],
    column_attributes: &[DataType],
) -> Result<Vec<u8>, RelationError> {
    let mut bytes = Vec::new();

    for (column_name, data_type) in column_names.iter().zip(column_attributes) {
        let value = row.get(column_name).ok_or(RelationError::MissingColumn {
            column: column_name.clone(),
        })?;

        match (data_type, value) {
            (DataType::Int, Value::Int(n)) => bytes.extend_from_slice(&n.to_le_bytes()),
            (DataType::Text, Value::Text(s)) => {
                let len = s.len().to_u16().map_err(|_| RelationError::TextTooLong {
                    column: column_name.clone(),
                    len: s.len(),
                })?;
                bytes.extend_from_slice(&len.to_le_bytes());
                bytes.extend_from_slice(s.as_bytes());
            }
            (DataType::Boolean, Value::Bool(b)) => bytes.push(u8::from(*b)),
            (expected, _) => {
                return Err(RelationError::TypeMismatch {
                    column: column_name.clone(),
                    expected: *expected,
                });
            }
        }
    }

    if bytes.len() > BLOCK_SZ {
        return Err(RelationError::RowTooLarge { size: bytes.len() });
    }

    Ok(bytes)
}

/// The inverse of [`marshal`]: rebuilds the row mapping from stored bytes.
pub(crate) fn unmarshal(
    bytes: &[u8],
    column_names: &[String],
    column_attributes: &[DataType],
) -> Result<Row, RelationError> {
    let mut row = Row::new();
    let mut offset = 0usize;

    for (column_name, data_type) in column_names.iter().zip(column_attributes) {
        let value = match data_type {
            DataType::Int => {
                let n =
                    read_le::<i32>(bytes, offset).map_err(|_| RelationError::TruncatedRow)?;
                offset += i32::WIDTH;
                Value::Int(n)
            }
            DataType::Text => {
                let len =
                    read_le::<u16>(bytes, offset).map_err(|_| RelationError::TruncatedRow)?;
                offset += u16::WIDTH;
                let text_bytes = bytes
                    .get(offset..offset + len as usize)
                    .ok_or(RelationError::TruncatedRow)?;
                let text =
                    String::from_utf8(text_bytes.to_vec()).map_err(|_| RelationError::InvalidText)?;
                offset += len as usize;
                Value::Text(text)
            }
            DataType::Boolean => {
                let byte = bytes.get(offset).ok_or(RelationError::TruncatedRow)?;
                offset += 1;
                Value::Bool(*byte != 0)
            }
        };

        row.insert(column_name.clone(), value);
    }

    Ok(row)
}
