//! A single MPEG-4 box
//!
//! An [`Mp4Box`] records where a box lives in its source stream and how big
//! it is. The payload stays in the source until a caller either materializes
//! it with [`Mp4Box::load_content`] or replaces it with
//! [`Mp4Box::set_content`]; from then on the owned buffer is authoritative.

use super::{BoxKind, FourCC, EXTENDED_HEADER_SIZE, HEADER_SIZE};
use crate::core::error::{BoxError, BoxResult};
use std::fmt;
use std::io::{Read, Seek, SeekFrom};

/// One box (atom) of an MPEG-4 file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mp4Box {
    pub(crate) name: FourCC,
    pub(crate) kind: BoxKind,
    /// Offset of the first header byte in the source stream
    pub(crate) position: Option<u64>,
    pub(crate) header_size: u64,
    pub(crate) content_size: u64,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) content: Option<Vec<u8>>,
    /// Header and payload sizes as found in the source stream
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) loaded: Option<(u64, u64)>,
}

impl Mp4Box {
    /// Create a box that has no source position and owns its payload
    pub fn with_content(name: FourCC, content: Vec<u8>) -> Self {
        let content_size = content.len() as u64;
        Self {
            name,
            kind: BoxKind::from_name(&name),
            position: None,
            header_size: header_size_for(content_size),
            content_size,
            content: Some(content),
            loaded: None,
        }
    }

    pub(crate) fn from_header(name: FourCC, position: u64, header_size: u64, size: u64) -> Self {
        Self {
            name,
            kind: BoxKind::from_name(&name),
            position: Some(position),
            header_size,
            content_size: size - header_size,
            content: None,
            loaded: Some((header_size, size - header_size)),
        }
    }

    pub fn name(&self) -> FourCC {
        self.name
    }

    pub fn kind(&self) -> BoxKind {
        self.kind
    }

    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// Get the size of the box header (8 or 16 bytes for extended size)
    pub fn header_size(&self) -> u64 {
        self.header_size
    }

    pub fn content_size(&self) -> u64 {
        self.content_size
    }

    /// Total box size, header included
    pub fn size(&self) -> u64 {
        self.header_size + self.content_size
    }

    /// Absolute offset of the first payload byte in the source stream
    pub fn content_start(&self) -> Option<u64> {
        self.position.map(|pos| pos + self.header_size)
    }

    /// Absolute offset just past this box in the source stream
    pub fn end(&self) -> Option<u64> {
        self.position.map(|pos| pos + self.size())
    }

    /// The owned payload, if one has been set or loaded
    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    /// Replace the payload with an owned buffer.
    ///
    /// The previous buffer, if any, is handed back to the caller; the box
    /// never holds more than one. A payload that pushes the box past 4 GiB
    /// switches the header to the extended size form.
    pub fn set_content(&mut self, content: Vec<u8>) -> Option<Vec<u8>> {
        self.content_size = content.len() as u64;
        self.header_size = self.header_size.max(header_size_for(self.content_size));
        self.content.replace(content)
    }

    /// Give up the owned payload, falling back to reading from the source
    /// stream when saving.
    ///
    /// A loaded box goes back to the header and payload sizes it was loaded
    /// with, so it covers exactly its region of the source again.
    pub fn take_content(&mut self) -> Option<Vec<u8>> {
        if let Some((header_size, content_size)) = self.loaded {
            self.header_size = header_size;
            self.content_size = content_size;
        }
        self.content.take()
    }

    /// Read the payload from the source stream into an owned buffer
    pub fn load_content<R: Read + Seek>(&mut self, reader: &mut R) -> BoxResult<&[u8]> {
        if self.content.is_none() {
            let start = self.content_start().ok_or(BoxError::MissingContent(self.name))?;
            let len = usize::try_from(self.content_size)
                .map_err(|_| BoxError::SizeOverflow(self.content_size))?;
            reader.seek(SeekFrom::Start(start))?;
            let mut data = vec![0u8; len];
            reader.read_exact(&mut data)?;
            self.content = Some(data);
        }
        Ok(self.content.as_deref().unwrap_or_default())
    }

    /// One-line summary for diagnostics
    pub fn describe(&self, indent: &str) -> String {
        format!("{}{}", indent, self)
    }
}

impl fmt::Display for Mp4Box {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}, {}]",
            self.name, self.header_size, self.content_size
        )
    }
}

fn header_size_for(content_size: u64) -> u64 {
    if content_size + HEADER_SIZE > u32::MAX as u64 {
        EXTENDED_HEADER_SIZE
    } else {
        HEADER_SIZE
    }
}
