//! telemetry/snapshot.rs
//! Immutable view of a group's counters.

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::GroupCounters;
use crate::types::StreamError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub members: usize,
    pub cursor: usize,
    pub finished: bool,
    pub reads: u64,
    pub bytes_read: u64,
    pub members_finished: u64,
    pub close_attempts: u64,
    pub close_failures: u64,
}

impl TelemetrySnapshot {
    pub fn from_counters(counters: &GroupCounters, members: usize, cursor: usize) -> Self {
        Self {
            members,
            cursor,
            finished: cursor >= members,
            reads: counters.reads,
            bytes_read: counters.bytes_read,
            members_finished: counters.members_finished,
            close_attempts: counters.close_attempts,
            close_failures: counters.close_failures,
        }
    }

    /// Cursor and finished-member count must agree; closes never exceed
    /// attempts.
    pub fn sanity_check(&self) -> bool {
        self.members_finished as usize == self.cursor
            && self.cursor <= self.members
            && self.close_failures <= self.close_attempts
    }

    pub fn to_json(&self) -> Result<String, StreamError> {
        serde_json::to_string(self).map_err(|e| StreamError::Validation(e.to_string()))
    }
}
