//! config.rs
//! Knobs for preview reads.

use crate::utils::best_chunk_size;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Chunk size used by whole-stream previews.
    /// - `None` → `DEFAULT_CHUNK_SIZE`.
    /// - `Some(n)` → clamped into `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]`.
    pub chunk_size: Option<usize>,

    /// Whether a bounded preview keeps reading after a short read.
    /// - `None` or `Some(false)` → exactly one read attempt.
    /// - `Some(true)` → read until the requested length or end-of-data.
    pub fill: Option<bool>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            chunk_size: None,
            fill: Some(false),
        }
    }
}

impl PreviewConfig {
    pub fn new(chunk_size: Option<usize>, fill: Option<bool>) -> Self {
        Self {
            chunk_size,
            fill: fill.or(Some(false)),
        }
    }

    pub fn fill_enabled() -> Self {
        Self { chunk_size: None, fill: Some(true) }
    }

    pub fn effective_chunk_size(&self) -> usize {
        best_chunk_size(self.chunk_size)
    }

    pub fn fills(&self) -> bool {
        self.fill.unwrap_or(false)
    }
}
