//! # boxkit
//!
//! Pure Rust loading and rewriting of MPEG-4 (ISO BMFF) boxes.
//!
//! The crate works one box at a time: [`load`] decodes a box header at a
//! stream position, [`Mp4Box`] describes where the box lives and optionally
//! owns a replacement payload, and [`Mp4Box::save`] writes it back out.
//! Chunk offset tables (`stco`, `co64`) are shifted by a caller-supplied
//! delta while saving, so a file stays playable after content in front of
//! its media data grows or shrinks.
//!
//! ```rust
//! use boxkit::{load, BoxResult};
//! use std::io::Cursor;
//!
//! fn main() -> BoxResult<()> {
//!     // stco box with a single chunk offset of 1000
//!     let mut data = 20u32.to_be_bytes().to_vec();
//!     data.extend_from_slice(b"stco");
//!     data.extend_from_slice(&0u32.to_be_bytes());
//!     data.extend_from_slice(&1u32.to_be_bytes());
//!     data.extend_from_slice(&1000u32.to_be_bytes());
//!
//!     let len = data.len() as u64;
//!     let mut reader = Cursor::new(data);
//!     let stco = load(&mut reader, 0, len)?;
//!
//!     let mut out = Vec::new();
//!     stco.save(&mut reader, &mut out, 24)?;
//!     assert_eq!(&out[16..20], &1024u32.to_be_bytes());
//!     Ok(())
//! }
//! ```
//!
//! Walking container boxes, deciding which payloads to replace and
//! computing deltas are left to the caller.

pub mod bmff;
pub mod core;

pub use bmff::{load, load_next, BoxKind, EntryWidth, FourCC, Mp4Box, SaveOptions};
pub use crate::core::error::{BoxError, BoxResult};
