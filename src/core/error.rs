//! Error types for box operations
//!
//! This module defines all error types used when loading and saving boxes.

use crate::bmff::FourCC;
use thiserror::Error;

/// Error types for box operations
#[derive(Debug, Error)]
pub enum BoxError {
    /// Resolved box size is smaller than the minimal 8-byte header
    #[error("Invalid size {size} in box '{name}' at offset {position}")]
    InvalidSize {
        name: FourCC,
        position: u64,
        size: u64,
    },

    /// Box extends past the bound supplied by the caller
    #[error("Box '{name}' at offset {position} with size {size} exceeds bound {end}")]
    OutOfBounds {
        name: FourCC,
        position: u64,
        size: u64,
        end: u64,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Chunk offset table does not fit in its box payload
    #[error("Malformed offset table: {0}")]
    MalformedTable(String),

    /// A shifted chunk offset does not fit in its entry width
    #[error("Offset {entry} shifted by {delta} does not fit in its entry width")]
    OffsetOverflow { entry: u64, delta: i64 },

    /// A box size that cannot be encoded
    #[error("Box size {0} cannot be encoded")]
    SizeOverflow(u64),

    /// Neither an owned buffer nor a source position to read the payload from
    #[error("Box '{0}' has no content to write")]
    MissingContent(FourCC),
}

/// Result type alias for box operations
pub type BoxResult<T> = Result<T, BoxError>;
