//! Box header decoding
//!
//! [`load`] parses exactly one box header and checks it against an upper
//! bound; it never descends into container boxes. Callers walk siblings
//! with [`load_next`] or by starting the next load at [`Mp4Box::end`].

use super::{Mp4Box, EXTENDED_HEADER_SIZE, EXTENDED_SIZE_MARKER, HEADER_SIZE};
use crate::core::codec::{read_fourcc, read_u32, read_u64};
use crate::core::error::{BoxError, BoxResult};
use log::{debug, warn};
use std::io::{Read, Seek, SeekFrom};

/// Load the box whose header starts at `pos`.
///
/// A `pos` of 0 means "the reader's current position", which lets a caller
/// enumerate boxes sequentially. The box must end at or before `end`.
///
/// # Returns
///
/// * `Ok(Mp4Box)` with no owned payload
/// * `Err(BoxError::InvalidSize)` if the resolved size is below 8
/// * `Err(BoxError::OutOfBounds)` if `pos + size > end`
/// * `Err(BoxError::IoError)` if the header cannot be read
pub fn load<R: Read + Seek>(reader: &mut R, pos: u64, end: u64) -> BoxResult<Mp4Box> {
    let pos = if pos < 1 {
        reader.stream_position()?
    } else {
        pos
    };

    reader.seek(SeekFrom::Start(pos))?;
    let size32 = read_u32(reader)?;
    let name = read_fourcc(reader)?;

    let (size, header_size) = if size32 == EXTENDED_SIZE_MARKER {
        (read_u64(reader)?, EXTENDED_HEADER_SIZE)
    } else {
        (size32 as u64, HEADER_SIZE)
    };

    // An extended size must still cover its own 16-byte header
    if size < header_size {
        warn!("Invalid size {} in '{}' at {}", size, name, pos);
        return Err(BoxError::InvalidSize {
            name,
            position: pos,
            size,
        });
    }

    if !matches!(pos.checked_add(size), Some(box_end) if box_end <= end) {
        warn!(
            "Box '{}' at {} with size {} exceeds bound {}",
            name, pos, size, end
        );
        return Err(BoxError::OutOfBounds {
            name,
            position: pos,
            size,
            end,
        });
    }

    let loaded = Mp4Box::from_header(name, pos, header_size, size);
    debug!("Loaded box {} at {}", loaded, pos);
    Ok(loaded)
}

/// Load the box at the reader's current position and move the reader to
/// the start of the following sibling.
pub fn load_next<R: Read + Seek>(reader: &mut R, end: u64) -> BoxResult<Mp4Box> {
    let pos = reader.stream_position()?;
    let loaded = load(reader, pos, end)?;
    reader.seek(SeekFrom::Start(pos + loaded.size()))?;
    Ok(loaded)
}
