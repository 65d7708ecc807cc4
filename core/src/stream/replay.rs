//! stream/replay.rs
//! In-memory stream that replays previously captured bytes.

use std::io::{self, Cursor, Read};

use bytes::Bytes;

use crate::stream::closeable::CloseableStream;
use crate::types::StreamError;

/// Replays a fixed buffer, then reports end-of-data. Closing touches nothing.
#[derive(Debug, Clone)]
pub struct ReplayBuffer {
    inner: Cursor<Bytes>,
}

impl ReplayBuffer {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self { inner: Cursor::new(bytes.into()) }
    }

    /// Total length of the captured bytes.
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }

    pub fn remaining(&self) -> usize {
        let pos = self.inner.position().min(self.len() as u64) as usize;
        self.len() - pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The full captured buffer, independent of how much was replayed.
    pub fn bytes(&self) -> &Bytes {
        self.inner.get_ref()
    }
}

impl Read for ReplayBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl CloseableStream for ReplayBuffer {
    fn close(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}
