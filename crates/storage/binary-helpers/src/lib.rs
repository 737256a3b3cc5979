//! Helpers for reading and writing the little-endian integers that make up
//! the on-disk format: page header fields and slot entries (`u16`), block
//! identifiers (`u32`), and row integers (`i32`).

/// Error types raised while interpreting binary data.
pub mod bin_error;

/// Checked narrowing conversions from `usize` into the on-disk widths.
pub mod conversions;

/// Little-endian serialization of integers into byte slices.
pub mod le;
