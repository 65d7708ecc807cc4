//! stream/preview.rs
//! Peek at the head of a stream without losing it.
//!
//! Summary: Captured bytes are replayed ahead of the partially consumed
//! source, so reading the returned stream from the start reproduces the
//! source exactly. Bytes read before a failure are kept in both the preview
//! and the replay; the failure is reported next to them.

use std::fmt;
use std::io::{self, Read};

use bytes::Bytes;
use log::debug;
use thiserror::Error;

use crate::config::PreviewConfig;
use crate::stream::closeable::CloseableStream;
use crate::stream::group::{Member, SequentialStreamGroup};
use crate::types::StreamError;
use crate::utils::{read_exact_or_eof, read_once, read_to_eof, Captured};

/// The stream handed back by a preview.
#[derive(Debug)]
pub enum Previewed<S> {
    /// Nothing was consumed; this is the caller's stream as given.
    Untouched(S),
    /// Replay of the captured bytes followed by the source.
    Replayed(SequentialStreamGroup),
}

impl<S> Previewed<S> {
    pub fn is_replayed(&self) -> bool {
        matches!(self, Previewed::Replayed(_))
    }

    pub fn as_untouched(&self) -> Option<&S> {
        match self {
            Previewed::Untouched(stream) => Some(stream),
            Previewed::Replayed(_) => None,
        }
    }
}

impl<S: CloseableStream + 'static> Previewed<S> {
    pub fn into_boxed(self) -> Box<dyn CloseableStream> {
        match self {
            Previewed::Untouched(stream) => Box::new(stream),
            Previewed::Replayed(group) => Box::new(group),
        }
    }
}

impl<S: Read> Read for Previewed<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Previewed::Untouched(stream) => stream.read(buf),
            Previewed::Replayed(group) => group.read(buf),
        }
    }
}

impl<S: CloseableStream> CloseableStream for Previewed<S> {
    fn close(&mut self) -> Result<(), StreamError> {
        match self {
            Previewed::Untouched(stream) => stream.close(),
            Previewed::Replayed(group) => SequentialStreamGroup::close(group),
        }
    }
}

/// Outcome of a preview: the captured head, the reconstructed stream and any
/// read failure hit while capturing.
#[derive(Debug)]
pub struct Preview<S> {
    bytes: Bytes,
    stream: Previewed<S>,
    error: Option<io::Error>,
}

impl<S> Preview<S> {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn stream(&self) -> &Previewed<S> {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut Previewed<S> {
        &mut self.stream
    }

    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (Bytes, Previewed<S>, Option<io::Error>) {
        (self.bytes, self.stream, self.error)
    }

    /// Split into success or a [`PreviewError`] that still owns the captured
    /// bytes and the reconstructed stream.
    pub fn into_result(self) -> Result<(Bytes, Previewed<S>), PreviewError<S>> {
        match self.error {
            None => Ok((self.bytes, self.stream)),
            Some(source) => Err(PreviewError { source, bytes: self.bytes, stream: self.stream }),
        }
    }
}

/// A preview read failed. Nothing already read is lost.
#[derive(Error)]
#[error("preview read failed: {source}")]
pub struct PreviewError<S> {
    #[source]
    pub source: io::Error,
    pub bytes: Bytes,
    pub stream: Previewed<S>,
}

impl<S> fmt::Debug for PreviewError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewError")
            .field("source", &self.source)
            .field("bytes", &self.bytes.len())
            .field("replayed", &self.stream.is_replayed())
            .finish()
    }
}

/// Read up to `n` bytes with a single read attempt.
///
/// `n == 0` reads nothing and hands back the source untouched. A source that
/// is already at end-of-data is also handed back untouched, with no error;
/// the next read on it finds the end-of-data again.
pub fn preview<S: CloseableStream + 'static>(stream: S, n: usize) -> Preview<S> {
    preview_with(stream, n, &PreviewConfig::default())
}

/// Like [`preview`], but keeps reading after short reads until `n` bytes or
/// end-of-data.
pub fn preview_fill<S: CloseableStream + 'static>(stream: S, n: usize) -> Preview<S> {
    preview_with(stream, n, &PreviewConfig::fill_enabled())
}

pub fn preview_with<S: CloseableStream + 'static>(
    mut stream: S,
    n: usize,
    config: &PreviewConfig,
) -> Preview<S> {
    if n == 0 {
        return untouched(stream);
    }

    let captured = if config.fills() {
        read_exact_or_eof(&mut stream, n)
    } else {
        read_once(&mut stream, n)
    };
    debug!(
        "preview requested {} byte(s), captured {} (eof: {}, failed: {})",
        n,
        captured.bytes.len(),
        captured.eof,
        captured.error.is_some()
    );

    settle(stream, captured)
}

/// Read the whole source into memory without closing it.
///
/// Closing the returned stream closes the source.
pub fn preview_all<S: CloseableStream + 'static>(stream: S) -> Preview<S> {
    preview_all_with(stream, &PreviewConfig::default())
}

pub fn preview_all_with<S: CloseableStream + 'static>(
    mut stream: S,
    config: &PreviewConfig,
) -> Preview<S> {
    let captured = read_to_eof(&mut stream, config.effective_chunk_size());
    debug!(
        "preview of whole stream captured {} byte(s) (failed: {})",
        captured.bytes.len(),
        captured.error.is_some()
    );

    settle(stream, captured)
}

fn untouched<S>(stream: S) -> Preview<S> {
    Preview { bytes: Bytes::new(), stream: Previewed::Untouched(stream), error: None }
}

fn settle<S: CloseableStream + 'static>(stream: S, captured: Captured) -> Preview<S> {
    let Captured { bytes, error, .. } = captured;

    // Nothing consumed, nothing to replay.
    if bytes.is_empty() && error.is_none() {
        return untouched(stream);
    }

    let group = SequentialStreamGroup::new(vec![Member::replay(bytes.clone()), Member::stream(stream)]);
    Preview { bytes, stream: Previewed::Replayed(group), error }
}
