//! utils.rs
//! Chunk size policy and bounded read helpers.
//!
//! Buffers grow with the bytes actually read, never with the requested
//! length, so any requested length is safe.

use std::io::{self, ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::constants::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};

/// Normalize a requested chunk size into `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]`.
pub fn best_chunk_size(requested: Option<usize>) -> usize {
    match requested {
        None => DEFAULT_CHUNK_SIZE,
        Some(size) => size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE),
    }
}

/// Bytes captured by a bounded read, plus the failure that stopped it (if any).
///
/// Data read before a failure is never dropped.
#[derive(Debug)]
pub struct Captured {
    pub bytes: Bytes,
    pub eof: bool,
    pub error: Option<io::Error>,
}

/// One read attempt of up to `len` bytes, capped at `MAX_CHUNK_SIZE`.
///
/// `Interrupted` is re-issued since it produced no data. As with
/// `Read::read_to_end`, there is no bound on those retries: a reader that only
/// ever returns `Interrupted` keeps this (and the other helpers here) looping.
pub fn read_once<R: Read + ?Sized>(r: &mut R, len: usize) -> Captured {
    let mut buf = vec![0u8; len.min(MAX_CHUNK_SIZE)];
    loop {
        match r.read(&mut buf) {
            Ok(n) => {
                buf.truncate(n);
                return Captured { bytes: Bytes::from(buf), eof: n == 0, error: None };
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Captured { bytes: Bytes::new(), eof: false, error: Some(e) },
        }
    }
}

// Same as read_once but keeps going on short reads until `len` bytes or EOF.
pub fn read_exact_or_eof<R: Read + ?Sized>(r: &mut R, len: usize) -> Captured {
    let mut out = BytesMut::new();
    let mut chunk = vec![0u8; len.clamp(1, DEFAULT_CHUNK_SIZE)];

    while out.len() < len {
        let want = (len - out.len()).min(chunk.len());
        match r.read(&mut chunk[..want]) {
            Ok(0) => return Captured { bytes: out.freeze(), eof: true, error: None },
            Ok(n) => out.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Captured { bytes: out.freeze(), eof: false, error: Some(e) },
        }
    }

    Captured { bytes: out.freeze(), eof: false, error: None }
}

/// Read until end-of-data in `chunk_size` steps without closing the reader.
pub fn read_to_eof<R: Read + ?Sized>(r: &mut R, chunk_size: usize) -> Captured {
    let mut out = BytesMut::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];

    loop {
        match r.read(&mut chunk) {
            Ok(0) => return Captured { bytes: out.freeze(), eof: true, error: None },
            Ok(n) => out.extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Captured { bytes: out.freeze(), eof: false, error: Some(e) },
        }
    }
}
