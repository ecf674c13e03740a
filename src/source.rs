//! Reading NAF input from files or stdin
//!
//! Gzip-compressed input is recognised by its magic bytes, whatever the file
//! is called.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decode raw input bytes to text, gunzipping when needed
pub fn decode(bytes: Vec<u8>) -> io::Result<String> {
    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let mut inflated = Vec::new();
        MultiGzDecoder::new(bytes.as_slice()).read_to_end(&mut inflated)?;
        inflated
    } else {
        bytes
    };
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn read_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(bytes)
}

/// Read a whole file as text
pub fn read_path(path: impl AsRef<Path>) -> io::Result<String> {
    read_reader(BufReader::new(File::open(path)?))
}

/// Read a file, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => read_path(path),
        None => read_reader(io::stdin().lock()),
    }
}
