//! Print the box structure of an MP4 file and rewrite it
//!
//! Usage: rewrite <input_file> <output_file> [delta]
//!
//! Every chunk offset in the output is shifted by `delta` (default 0).
//! Set `RUST_LOG=debug` to see each box as it is loaded and saved.

use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};

use boxkit::{load, BoxResult, FourCC};

const CONTAINERS: &[FourCC] = &[
    FourCC::new(b"moov"),
    FourCC::new(b"trak"),
    FourCC::new(b"mdia"),
    FourCC::new(b"minf"),
    FourCC::new(b"stbl"),
];

fn rewrite<R: Read + Seek, W: Write>(
    reader: &mut R,
    writer: &mut W,
    mut pos: u64,
    end: u64,
    delta: i64,
    indent: &str,
) -> BoxResult<()> {
    while pos < end {
        let b = load(reader, pos, end)?;
        println!("{}", b.describe(indent));
        if CONTAINERS.contains(&b.name()) {
            b.write_header(writer)?;
            let start = b.content_start().unwrap_or_default();
            let child_indent = format!("{}  ", indent);
            rewrite(reader, writer, start, start + b.content_size(), delta, &child_indent)?;
        } else {
            b.save(reader, writer, delta)?;
        }
        pos += b.size();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (input_path, output_path, delta) = match args.len() {
        3 => (&args[1], &args[2], 0),
        4 => (&args[1], &args[2], args[3].parse::<i64>()?),
        n => {
            return Err(format!(
                "expected 2 or 3 arguments (input_file output_file [delta]), got {} arguments",
                n - 1
            )
            .into())
        }
    };

    let input = File::open(input_path)?;
    let len = input.metadata()?.len();
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(File::create(output_path)?);

    reader.rewind()?;
    rewrite(&mut reader, &mut writer, 0, len, delta, "")?;
    writer.flush()?;

    println!("Wrote {} with chunk offsets shifted by {}", output_path, delta);
    Ok(())
}
