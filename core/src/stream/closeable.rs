//! stream/closeable.rs
//! The closeable stream capability and the adapters that provide it.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::types::StreamError;

/// A byte source that also holds a resource to release.
///
/// End-of-data is `Ok(0)` from `read` on a non-empty buffer; anything else
/// that goes wrong is an `Err`. `close` must tolerate being called on a stream
/// that was never read, and on one whose last read failed.
pub trait CloseableStream: Read + Send {
    fn close(&mut self) -> Result<(), StreamError>;
}

impl<T: CloseableStream + ?Sized> CloseableStream for Box<T> {
    fn close(&mut self) -> Result<(), StreamError> {
        (**self).close()
    }
}

/// Wraps any reader with a close that does nothing.
#[derive(Debug)]
pub struct NopClose<R> {
    inner: R,
}

impl<R: Read + Send> NopClose<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for NopClose<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Send> CloseableStream for NopClose<R> {
    fn close(&mut self) -> Result<(), StreamError> {
        Ok(())
    }
}

/// A file handle released on `close` rather than on drop.
#[derive(Debug)]
pub struct FileStream {
    file: Option<File>,
    path: Option<PathBuf>,
}

impl FileStream {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self { file: Some(file), path: Some(path.to_path_buf()) })
    }

    pub fn from_file(file: File) -> Self {
        Self { file: Some(file), path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }
}

impl Read for FileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.read(buf),
            None => Err(io::Error::other(StreamError::Closed)),
        }
    }
}

impl CloseableStream for FileStream {
    // Second and later closes are no-ops.
    fn close(&mut self) -> Result<(), StreamError> {
        if let Some(file) = self.file.take() {
            debug!("closing file stream {:?}", self.path);
            drop(file);
        }
        Ok(())
    }
}
