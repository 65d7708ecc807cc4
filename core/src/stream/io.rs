//! stream/io.rs
//! Normalized input sources.

use std::io::Read;
use std::path::PathBuf;

use crate::stream::closeable::{CloseableStream, FileStream, NopClose};
use crate::stream::replay::ReplayBuffer;
use crate::types::StreamError;

/// Canonical input abstraction
pub enum InputSource {
    Stream(Box<dyn CloseableStream>),
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Normalize input source into a boxed closeable stream
pub fn open_input(src: InputSource) -> Result<Box<dyn CloseableStream>, StreamError> {
    let stream: Box<dyn CloseableStream> = match src {
        InputSource::Stream(s) => s,
        InputSource::Reader(r) => Box::new(NopClose::new(r)),
        InputSource::File(p) => Box::new(FileStream::open(p)?),
        InputSource::Memory(b) => Box::new(ReplayBuffer::new(b)),
    };
    Ok(stream)
}
