//! stream/group.rs
//! Sequential concatenation of closeable streams.
//!
//! Summary: Members are read strictly in insertion order. A cursor advances
//! once per member end-of-data and never moves back. Closing reaches every
//! member no matter how many of them fail.

use std::fmt;
use std::io::{self, Read};
use std::sync::{Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use log::{debug, trace, warn};

use crate::stream::closeable::CloseableStream;
use crate::stream::replay::ReplayBuffer;
use crate::telemetry::{GroupCounters, TelemetrySnapshot};
use crate::types::{AggregateCloseError, CloseFailure, StreamError};

/// One slot of a group: captured bytes or a caller-supplied stream.
pub enum Member {
    Replay(ReplayBuffer),
    Stream(Box<dyn CloseableStream>),
}

impl Member {
    pub fn stream<S: CloseableStream + 'static>(stream: S) -> Self {
        Member::Stream(Box::new(stream))
    }

    pub fn replay(bytes: impl Into<Bytes>) -> Self {
        Member::Replay(ReplayBuffer::new(bytes))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Member::Replay(_) => "replay",
            Member::Stream(_) => "stream",
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Member::Replay(replay) => replay.read(buf),
            Member::Stream(stream) => stream.read(buf),
        }
    }

    fn close(&mut self) -> Result<(), StreamError> {
        match self {
            Member::Replay(_) => Ok(()),
            Member::Stream(stream) => stream.close(),
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Replay(replay) => f.debug_tuple("Replay").field(&replay.len()).finish(),
            Member::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<ReplayBuffer> for Member {
    fn from(replay: ReplayBuffer) -> Self {
        Member::Replay(replay)
    }
}

impl From<Box<dyn CloseableStream>> for Member {
    fn from(stream: Box<dyn CloseableStream>) -> Self {
        Member::Stream(stream)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// More data may follow on a later call.
    Pending,
    /// Every member has reported end-of-data.
    Finished,
}

/// Result of one delegated read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOutcome {
    pub count: usize,
    pub status: ReadStatus,
}

impl ReadOutcome {
    fn pending(count: usize) -> Self {
        Self { count, status: ReadStatus::Pending }
    }

    fn finished() -> Self {
        Self { count: 0, status: ReadStatus::Finished }
    }

    pub fn is_finished(&self) -> bool {
        self.status == ReadStatus::Finished
    }
}

#[derive(Debug)]
struct GroupState {
    members: Vec<Member>,
    cursor: usize,
    closed: bool,
    counters: GroupCounters,
}

/// Reads its members one after another as a single stream.
///
/// All methods take `&self`; a per-group mutex serializes cursor handling,
/// the delegated read and `close`. The logical contract is still one reader
/// consuming the group serially.
#[derive(Debug)]
pub struct SequentialStreamGroup {
    state: Mutex<GroupState>,
}

impl SequentialStreamGroup {
    /// An empty member list yields a group that is finished from the start.
    pub fn new(members: Vec<Member>) -> Self {
        debug!("stream group created with {} member(s)", members.len());
        Self {
            state: Mutex::new(GroupState {
                members,
                cursor: 0,
                closed: false,
                counters: GroupCounters::default(),
            }),
        }
    }

    pub fn from_streams<I>(streams: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn CloseableStream>>,
    {
        Self::new(streams.into_iter().map(Member::Stream).collect())
    }

    // Member state stays consistent across a panic in a member read, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, GroupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().members.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    pub fn is_finished(&self) -> bool {
        let state = self.lock();
        state.cursor >= state.members.len()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Read from the member under the cursor.
    ///
    /// A member end-of-data advances the cursor by exactly one and returns
    /// `(0, Pending)` if members remain, `(0, Finished)` otherwise. A member
    /// failure is returned as-is and the cursor stays put.
    pub fn read_chunk(&self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        let mut state = self.lock();
        let GroupState { members, cursor, counters, .. } = &mut *state;

        let total = members.len();
        let Some(member) = members.get_mut(*cursor) else {
            return Ok(ReadOutcome::finished());
        };

        // A zero-length read says nothing about end-of-data.
        if buf.is_empty() {
            return Ok(ReadOutcome::pending(0));
        }

        let n = match member.read(buf) {
            Ok(n) => n,
            Err(e) => {
                debug!("member {} ({}) read failed: {}", cursor, member.kind(), e);
                return Err(e);
            }
        };
        counters.add_read(n);
        trace!("member {} ({}) read {} byte(s)", cursor, member.kind(), n);

        if n > 0 {
            return Ok(ReadOutcome::pending(n));
        }

        *cursor += 1;
        counters.add_member_finished();
        debug!("stream group advanced to member {}/{}", cursor, total);

        if *cursor >= total {
            Ok(ReadOutcome::finished())
        } else {
            Ok(ReadOutcome::pending(0))
        }
    }

    /// Close every member, in order, even when some fail.
    ///
    /// Calling it again after it has run is a no-op; members are closed
    /// exactly once.
    pub fn close(&self) -> Result<(), StreamError> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let GroupState { members, counters, .. } = &mut *state;
        let mut failures = Vec::new();

        for (index, member) in members.iter_mut().enumerate() {
            let result = member.close();
            counters.add_close(result.is_err());
            if let Err(error) = result {
                warn!("member {} ({}) failed to close: {}", index, member.kind(), error);
                failures.push(CloseFailure { index, error });
            }
        }

        match AggregateCloseError::from_failures(failures) {
            Some(aggregate) => Err(StreamError::Close(aggregate)),
            None => Ok(()),
        }
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let state = self.lock();
        TelemetrySnapshot::from_counters(&state.counters, state.members.len(), state.cursor)
    }
}

impl FromIterator<Member> for SequentialStreamGroup {
    fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// Skips over member boundaries so `Ok(0)` only ever means the whole group is
// done.
impl Read for &SequentialStreamGroup {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let outcome = self.read_chunk(buf)?;
            if outcome.count > 0 || outcome.is_finished() || buf.is_empty() {
                return Ok(outcome.count);
            }
        }
    }
}

impl Read for SequentialStreamGroup {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&*self).read(buf)
    }
}

impl CloseableStream for SequentialStreamGroup {
    fn close(&mut self) -> Result<(), StreamError> {
        SequentialStreamGroup::close(self)
    }
}
