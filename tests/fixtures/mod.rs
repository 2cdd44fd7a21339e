//! Synthetic MPEG-4 files for tests
#![allow(dead_code)]

use boxkit::{load, BoxResult, FourCC};
use std::io::{Read, Seek, Write};

pub const CONTAINERS: &[&[u8; 4]] = &[b"moov", b"trak", b"mdia", b"minf", b"stbl"];

pub fn short_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    data.extend_from_slice(name);
    data.extend_from_slice(payload);
    data
}

pub fn extended_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(name);
    data.extend_from_slice(&(16 + payload.len() as u64).to_be_bytes());
    data.extend_from_slice(payload);
    data
}

pub fn stco_payload(entries: &[u32]) -> Vec<u8> {
    let mut data = 0u32.to_be_bytes().to_vec();
    data.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        data.extend_from_slice(&entry.to_be_bytes());
    }
    data
}

pub fn co64_payload(entries: &[u64]) -> Vec<u8> {
    let mut data = 0u32.to_be_bytes().to_vec();
    data.extend_from_slice(&(entries.len() as u32).to_be_bytes());
    for entry in entries {
        data.extend_from_slice(&entry.to_be_bytes());
    }
    data
}

/// A small movie: `ftyp`, `moov` holding two tracks (one `stco`, one
/// `co64`), then `mdat`. The chunk offsets point at the `mdat` samples.
pub struct Movie {
    pub data: Vec<u8>,
    pub chunk_offsets: Vec<u64>,
    pub samples: Vec<&'static [u8]>,
}

pub fn movie() -> Movie {
    let ftyp = short_box(b"ftyp", b"isom\0\0\0\0isom");
    let samples: Vec<&'static [u8]> = vec![b"first chunk", b"second", b"third chunk!"];

    // Table sizes do not depend on the offsets, so lay out with zeros first
    let build_moov = |stco: &[u32], co64: &[u64]| {
        let trak1 = short_box(
            b"trak",
            &short_box(
                b"mdia",
                &short_box(
                    b"minf",
                    &short_box(b"stbl", &short_box(b"stco", &stco_payload(stco))),
                ),
            ),
        );
        let trak2 = short_box(
            b"trak",
            &short_box(
                b"mdia",
                &short_box(
                    b"minf",
                    &short_box(b"stbl", &extended_box(b"co64", &co64_payload(co64))),
                ),
            ),
        );
        let mut moov_payload = short_box(b"mvhd", &[0u8; 20]);
        moov_payload.extend(trak1);
        moov_payload.extend(trak2);
        short_box(b"moov", &moov_payload)
    };

    let moov_len = build_moov(&[0, 0], &[0]).len() as u64;
    let mdat_start = ftyp.len() as u64 + moov_len;
    let mut offsets = Vec::new();
    let mut cursor = mdat_start + 8;
    for sample in &samples {
        offsets.push(cursor);
        cursor += sample.len() as u64;
    }

    let moov = build_moov(&[offsets[0] as u32, offsets[1] as u32], &[offsets[2]]);
    let mdat = short_box(b"mdat", &samples.concat());

    let mut data = ftyp;
    data.extend(moov);
    data.extend(mdat);
    Movie {
        data,
        chunk_offsets: offsets,
        samples,
    }
}

/// Save every box between `pos` and `end`, descending into containers and
/// applying `delta` to chunk offset tables.
pub fn save_tree<R: Read + Seek, W: Write>(
    reader: &mut R,
    writer: &mut W,
    mut pos: u64,
    end: u64,
    delta: i64,
) -> BoxResult<()> {
    while pos < end {
        let b = load(reader, pos, end)?;
        if CONTAINERS.iter().any(|name| b.name() == FourCC(**name)) {
            b.write_header(writer)?;
            let start = b.content_start().unwrap_or_default();
            save_tree(reader, writer, start, start + b.content_size(), delta)?;
        } else {
            b.save(reader, writer, delta)?;
        }
        pos += b.size();
    }
    Ok(())
}

/// Collect every chunk offset in the file, in file order
pub fn read_chunk_offsets(data: &[u8]) -> Vec<u64> {
    let mut offsets = Vec::new();
    collect_offsets(data, 0, data.len(), &mut offsets);
    offsets
}

fn collect_offsets(data: &[u8], mut pos: usize, end: usize, offsets: &mut Vec<u64>) {
    while pos + 8 <= end {
        let size32 = u32::from_be_bytes(data[pos..pos + 4].try_into().unwrap()) as usize;
        let name = &data[pos + 4..pos + 8];
        let (size, header) = if size32 == 1 {
            let size = u64::from_be_bytes(data[pos + 8..pos + 16].try_into().unwrap());
            (size as usize, 16)
        } else {
            (size32, 8)
        };
        let table = pos + header;
        if name == b"stco" || name == b"co64" {
            let count = u32::from_be_bytes(data[table + 4..table + 8].try_into().unwrap());
            for i in 0..count as usize {
                let offset = if name == b"stco" {
                    let at = table + 8 + i * 4;
                    u32::from_be_bytes(data[at..at + 4].try_into().unwrap()) as u64
                } else {
                    let at = table + 8 + i * 8;
                    u64::from_be_bytes(data[at..at + 8].try_into().unwrap())
                };
                offsets.push(offset);
            }
        } else if CONTAINERS.iter().any(|c| &c[..] == name) {
            collect_offsets(data, table, pos + size, offsets);
        }
        pos += size;
    }
}
