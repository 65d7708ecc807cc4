//! telemetry/mod.rs
//! Per-group counters and immutable snapshots.
//!
//! - Counters are mutated under the owning group's lock.
//! - Snapshots are plain values, safe to hand out and serialize.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
