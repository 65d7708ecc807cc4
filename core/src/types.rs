//! types.rs
//! Crate error types: the unified stream error and aggregated close failures.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::constants::CLOSE_FAILED_PREFIX;

/// Unified stream error covering I/O, aggregated close failures and validation.
/// - `From<io::Error>` enables `?` from plain readers.
/// - Read paths keep returning `io::Error` untouched; this type is for close
///   and construction paths.
#[derive(Debug, Error)]
pub enum StreamError {
    /// I/O error from an underlying resource.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// One or more members of a group failed to close.
    #[error(transparent)]
    Close(#[from] AggregateCloseError),

    /// The stream was already released.
    #[error("stream closed")]
    Closed,

    /// Generic validation with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}

/// A single member that failed to close, with its position in the group.
#[derive(Debug)]
pub struct CloseFailure {
    pub index: usize,
    pub error: StreamError,
}

impl fmt::Display for CloseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member {}: {}", self.index, self.error)
    }
}

/// Every close failure seen while closing a group, in member order.
#[derive(Debug)]
pub struct AggregateCloseError {
    failures: Vec<CloseFailure>,
}

impl AggregateCloseError {
    /// Returns `None` when nothing failed.
    pub fn from_failures(failures: Vec<CloseFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[CloseFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<CloseFailure> {
        self.failures
    }
}

impl fmt::Display for AggregateCloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", CLOSE_FAILED_PREFIX)?;
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateCloseError {}
