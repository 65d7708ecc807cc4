//! telemetry/counters.rs
//! Mutable counters kept by a stream group.
//!
//! Summary: Collects read calls, byte counts and close outcomes.
//! Converted into an immutable TelemetrySnapshot on demand.
use std::ops::AddAssign;

/// Deterministic counters collected while a group is read and closed
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct GroupCounters {
    pub reads: u64,
    pub bytes_read: u64,
    pub members_finished: u64,
    pub close_attempts: u64,
    pub close_failures: u64,
}

impl GroupCounters {
    /// Record one delegated read that returned `n` bytes.
    pub fn add_read(&mut self, n: usize) {
        self.reads += 1;
        self.bytes_read += n as u64;
    }

    /// Record a member reporting end-of-data.
    pub fn add_member_finished(&mut self) {
        self.members_finished += 1;
    }

    /// Record one member close and whether it failed.
    pub fn add_close(&mut self, failed: bool) {
        self.close_attempts += 1;
        if failed {
            self.close_failures += 1;
        }
    }

    pub fn merge(&mut self, other: &GroupCounters) {
        self.reads += other.reads;
        self.bytes_read += other.bytes_read;
        self.members_finished += other.members_finished;
        self.close_attempts += other.close_attempts;
        self.close_failures += other.close_failures;
    }
}

impl AddAssign for GroupCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
