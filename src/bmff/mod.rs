//! ISO Base Media File Format (BMFF) boxes
//!
//! This module loads individual MPEG-4 boxes, lets callers replace their
//! payloads, and writes them back out, shifting chunk offset tables when
//! the media data they point to has moved.
//!
//! BMFF Structure:
//! - Files are composed of "boxes" (also called "atoms" in QuickTime)
//! - Each box has: 4-byte size, 4-byte type, optional extended size, data
//! - All multi-byte integers are big-endian

use std::fmt;

pub mod loader;
pub mod mp4box;
pub mod options;
pub mod patcher;
pub mod writer;

pub use loader::{load, load_next};
pub use mp4box::Mp4Box;
pub use options::SaveOptions;
pub use patcher::{EntryWidth, OffsetSource, SliceSource, StreamSource};

// ============================================================================
// Constants
// ============================================================================

/// Header size of a box with a 32-bit size field
pub const HEADER_SIZE: u64 = 8;

/// Header size of a box with a 64-bit extended size field
pub const EXTENDED_HEADER_SIZE: u64 = 16;

/// Size field value announcing a 64-bit extended size
pub const EXTENDED_SIZE_MARKER: u32 = 1;

/// Chunk offset box with 32-bit entries
pub const STCO_BOX: FourCC = FourCC(*b"stco");

/// Chunk offset box with 64-bit entries
pub const CO64_BOX: FourCC = FourCC(*b"co64");

// ============================================================================
// Types
// ============================================================================

/// A raw 4-byte box type.
///
/// The bytes are kept as read; they are not required to be printable ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{}", std::ascii::escape_default(byte))?;
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCC({})", self)
    }
}

/// Box classification, decided once from the box type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BoxKind {
    /// Any box whose payload is copied through unchanged
    #[default]
    Generic,
    /// `stco`: chunk offsets stored as 32-bit entries
    ChunkOffset32,
    /// `co64`: chunk offsets stored as 64-bit entries
    ChunkOffset64,
}

impl BoxKind {
    pub fn from_name(name: &FourCC) -> Self {
        match *name {
            STCO_BOX => BoxKind::ChunkOffset32,
            CO64_BOX => BoxKind::ChunkOffset64,
            _ => BoxKind::Generic,
        }
    }

    /// Entry width of the offset table carried by this kind, if any
    pub fn entry_width(self) -> Option<EntryWidth> {
        match self {
            BoxKind::Generic => None,
            BoxKind::ChunkOffset32 => Some(EntryWidth::U32),
            BoxKind::ChunkOffset64 => Some(EntryWidth::U64),
        }
    }
}
