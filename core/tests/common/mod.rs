#![allow(dead_code)]

use std::io::{self, Cursor, ErrorKind, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use preview_io::stream::CloseableStream;
use preview_io::types::StreamError;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Observes a MockStream after it has been moved into a group.
#[derive(Clone, Default, Debug)]
pub struct Probe {
    closes: Arc<AtomicUsize>,
    reads: Arc<AtomicUsize>,
}

impl Probe {
    pub fn is_closed(&self) -> bool {
        self.close_count() > 0
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

/// In-memory closeable stream with injectable failures.
#[derive(Debug)]
pub struct MockStream {
    data: Cursor<Vec<u8>>,
    max_chunk: Option<usize>,
    read_error: Option<String>,
    fail_at: usize,
    close_error: Option<String>,
    probe: Probe,
}

impl MockStream {
    pub fn new(data: impl Into<Vec<u8>>) -> (Self, Probe) {
        let probe = Probe::default();
        let stream = Self {
            data: Cursor::new(data.into()),
            max_chunk: None,
            read_error: None,
            fail_at: 0,
            close_error: None,
            probe: probe.clone(),
        };
        (stream, probe)
    }

    /// Every read fails.
    pub fn with_read_error(mut self, msg: &str) -> Self {
        self.read_error = Some(msg.to_string());
        self.fail_at = 0;
        self
    }

    /// Reads succeed until `offset` bytes were produced, then fail.
    pub fn with_read_error_at(mut self, offset: usize, msg: &str) -> Self {
        self.read_error = Some(msg.to_string());
        self.fail_at = offset;
        self
    }

    pub fn with_close_error(mut self, msg: &str) -> Self {
        self.close_error = Some(msg.to_string());
        self
    }

    /// Caps how many bytes a single read may return.
    pub fn with_max_chunk(mut self, max: usize) -> Self {
        self.max_chunk = Some(max);
        self
    }

    pub fn boxed(self) -> Box<dyn CloseableStream> {
        Box::new(self)
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.probe.reads.fetch_add(1, Ordering::SeqCst);

        let pos = self.data.position() as usize;
        let mut limit = buf.len();
        if let Some(msg) = &self.read_error {
            if pos >= self.fail_at {
                return Err(io::Error::new(ErrorKind::Other, msg.clone()));
            }
            limit = limit.min(self.fail_at - pos);
        }
        if let Some(max) = self.max_chunk {
            limit = limit.min(max);
        }
        self.data.read(&mut buf[..limit])
    }
}

impl CloseableStream for MockStream {
    fn close(&mut self) -> Result<(), StreamError> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        match &self.close_error {
            Some(msg) => Err(StreamError::Io(io::Error::new(ErrorKind::Other, msg.clone()))),
            None => Ok(()),
        }
    }
}

/// Three mocks holding "hello", "some", "data".
pub fn sample_streams() -> (Vec<MockStream>, Vec<Probe>) {
    ["hello", "some", "data"]
        .iter()
        .map(|d| MockStream::new(d.as_bytes()))
        .unzip()
}

/// Read in fixed-size steps until `Ok(0)`.
pub fn read_chunked<R: Read>(r: &mut R, chunk: usize) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..n]);
    }
}
