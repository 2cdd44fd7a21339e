//! Tests for chunked payload copies
//!
//! Payloads are streamed 64 MiB at a time. These tests check the copies
//! around that boundary move exactly the requested number of bytes.

#[path = "fixtures/mod.rs"]
mod fixtures;

use boxkit::bmff::options::COPY_CHUNK_SIZE;
use boxkit::bmff::writer::copy_bytes;
use boxkit::{load, SaveOptions};
use fixtures::extended_box;
use std::io::{self, Cursor, Read, Write};

/// Writer that only counts bytes and checks they all carry one value
struct CountingSink {
    expected: u8,
    written: u64,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        assert!(buf.iter().all(|&b| b == self.expected));
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn copies_exact_counts_around_default_chunk() {
    let chunk = COPY_CHUNK_SIZE as u64;
    for count in [chunk - 1, chunk, chunk + 1, 2 * chunk + 3] {
        // one spare byte in the source must stay unread
        let mut reader = io::repeat(0xAB).take(count + 1);
        let mut sink = CountingSink {
            expected: 0xAB,
            written: 0,
        };
        copy_bytes(&mut reader, &mut sink, count, COPY_CHUNK_SIZE).unwrap();
        assert_eq!(sink.written, count);
        assert_eq!(reader.limit(), 1);
    }
}

#[test]
fn large_mdat_round_trip() {
    let payload: Vec<u8> = (0..COPY_CHUNK_SIZE + 1).map(|i| (i % 251) as u8).collect();
    let data = extended_box(b"mdat", &payload);
    drop(payload);
    let len = data.len() as u64;
    let mut reader = Cursor::new(data);

    let mdat = load(&mut reader, 0, len).unwrap();
    assert_eq!(mdat.content_size(), COPY_CHUNK_SIZE as u64 + 1);
    let mut out = Vec::with_capacity(len as usize);
    mdat.save(&mut reader, &mut out, 0).unwrap();
    assert!(out == *reader.get_ref());
}

#[test]
fn small_chunks_match_single_shot_copy() {
    let payload: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 256) as u8).collect();
    let data = extended_box(b"free", &payload);
    let len = data.len() as u64;
    let mut reader = Cursor::new(data.clone());
    let b = load(&mut reader, 0, len).unwrap();

    for chunk_size in [1, 7, 999, 1000, 1001, 4096] {
        let mut out = Vec::new();
        b.save_with(
            &mut reader,
            &mut out,
            0,
            &SaveOptions::default().chunk_size(chunk_size),
        )
        .unwrap();
        assert_eq!(out, data, "chunk size {}", chunk_size);
    }
}
