//! Box serialization
//!
//! Saving a box writes its header and then picks one payload path:
//! - `stco` / `co64`: the offset table is rewritten with the caller's delta
//! - owned content: the buffer is written as is
//! - otherwise: the payload is copied from the source stream in chunks

use super::patcher::{patch_offsets, SliceSource, StreamSource};
use super::{Mp4Box, SaveOptions, EXTENDED_HEADER_SIZE, EXTENDED_SIZE_MARKER};
use crate::core::codec::{write_fourcc, write_u32, write_u64};
use crate::core::error::{BoxError, BoxResult};
use log::debug;
use std::io::{self, Read, Seek, SeekFrom, Write};

impl Mp4Box {
    /// Write this box to `writer`, reading any payload bytes from `reader`.
    ///
    /// `delta` is the number of bytes the referenced media data has moved;
    /// it only affects chunk offset tables. Uses [`SaveOptions::default`].
    ///
    /// If this fails part way, the contents of `writer` are undefined.
    pub fn save<R: Read + Seek, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        delta: i64,
    ) -> BoxResult<()> {
        self.save_with(reader, writer, delta, &SaveOptions::default())
    }

    /// Write this box to `writer` with explicit options
    pub fn save_with<R: Read + Seek, W: Write>(
        &self,
        reader: &mut R,
        writer: &mut W,
        delta: i64,
        options: &SaveOptions,
    ) -> BoxResult<()> {
        self.write_header(writer)?;

        if let Some(start) = self.content_start().filter(|&start| start != 0) {
            reader.seek(SeekFrom::Start(start))?;
        }

        if let Some(width) = self.kind.entry_width() {
            debug!("Saving {} with offset delta {}", self, delta);
            return match self.content.as_deref() {
                Some(content) => patch_offsets(
                    &mut SliceSource::new(content),
                    writer,
                    width,
                    self.content_size,
                    delta,
                ),
                None => {
                    self.require_source()?;
                    patch_offsets(
                        &mut StreamSource::new(reader),
                        writer,
                        width,
                        self.content_size,
                        delta,
                    )
                }
            };
        }

        match self.content.as_deref() {
            Some(content) => {
                debug!("Saving {} from owned content", self);
                writer.write_all(content)?;
                Ok(())
            }
            None => {
                debug!("Saving {} from source stream", self);
                self.require_source()?;
                copy_bytes(reader, writer, self.content_size, options.chunk_size)
            }
        }
    }

    /// Write only the box header.
    ///
    /// Container boxes are written this way: the header first, then each
    /// child saved in turn.
    pub fn write_header<W: Write>(&self, writer: &mut W) -> BoxResult<()> {
        let size = self.size();
        if self.header_size == EXTENDED_HEADER_SIZE {
            write_u32(writer, EXTENDED_SIZE_MARKER)?;
            write_fourcc(writer, &self.name)?;
            write_u64(writer, size)
        } else {
            let size = u32::try_from(size).map_err(|_| BoxError::SizeOverflow(size))?;
            write_u32(writer, size)?;
            write_fourcc(writer, &self.name)
        }
    }

    // A box built in memory has nothing to stream its payload from
    fn require_source(&self) -> BoxResult<()> {
        if self.position.is_none() && self.content_size > 0 {
            return Err(BoxError::MissingContent(self.name));
        }
        Ok(())
    }
}

/// Copy exactly `count` bytes from `reader` to `writer`, at most
/// `chunk_size` bytes per transfer.
pub fn copy_bytes<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    count: u64,
    chunk_size: usize,
) -> BoxResult<()> {
    let chunk_size = chunk_size.max(1);
    let mut buffer = vec![0u8; (count.min(chunk_size as u64)) as usize];
    let mut remaining = count;

    while remaining > 0 {
        let len = (remaining.min(buffer.len() as u64)) as usize;
        reader.read_exact(&mut buffer[..len]).map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("source ended {} bytes short of payload", remaining),
                )
            } else {
                err
            }
        })?;
        writer.write_all(&buffer[..len])?;
        remaining -= len as u64;
    }

    Ok(())
}
