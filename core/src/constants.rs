//! constants.rs
//! Read chunk defaults and sanity bounds.

/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024; // 8 KiB

/// Smallest chunk used by whole-stream reads.
pub const MIN_CHUNK_SIZE: usize = 512;

/// Max chunk size sanity bound (1 MiB).
pub const MAX_CHUNK_SIZE: usize = 1024 * 1024;

/// Prefix of the aggregate close failure message.
pub const CLOSE_FAILED_PREFIX: &str = "at least one underlying stream failed to close";
