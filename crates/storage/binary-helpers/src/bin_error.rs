use thiserror::Error;

/// Failures while decoding or encoding the fixed-width integers of the disk
/// format.
#[derive(Debug, Error)]
pub enum BinaryError {
    #[error("a {width}-byte integer at offset {offset} does not fit inside the buffer")]
    OutOfRange { width: usize, offset: usize },
    #[error("integer codec wants a window of exactly {wanted} bytes, got {got}")]
    WindowSizeMismatch { wanted: usize, got: usize },
}
