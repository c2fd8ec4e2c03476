//! Frame scheduler
//!
//! A debounced task queue tied to the host's frame cycle. Work requested
//! during frame `n` runs at the start of frame `n + 1`, and any number of
//! requests for the same task kind before that point coalesce into one run.
//!
//! A single in-flight guard prevents overlapping or recursive runs: while a
//! frame is being processed, `begin_frame` yields nothing and new requests
//! are queued for the following frame.

use smallvec::SmallVec;

/// A coalesced unit of deferred work
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameTask<K> {
    pub kind: K,
    /// Frame number at the time of the first request
    pub requested_at: u64,
    /// Number of requests folded into this task
    pub requests: u32,
}

/// Debounced per-frame task queue
#[derive(Debug)]
pub struct FrameScheduler<K> {
    frame: u64,
    pending: SmallVec<[FrameTask<K>; 2]>,
    in_flight: bool,
}

impl<K: Copy + Eq + std::fmt::Debug> FrameScheduler<K> {
    pub fn new() -> Self {
        Self {
            frame: 0,
            pending: SmallVec::new(),
            in_flight: false,
        }
    }

    /// Current frame number
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether a frame's tasks are currently running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether `kind` is waiting for the next frame
    pub fn is_pending(&self, kind: K) -> bool {
        self.pending.iter().any(|task| task.kind == kind)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Request `kind` for the next frame.
    ///
    /// Returns `true` if a new task was queued, `false` if the request was
    /// folded into one already pending.
    pub fn request(&mut self, kind: K) -> bool {
        if let Some(task) = self.pending.iter_mut().find(|task| task.kind == kind) {
            task.requests += 1;
            tracing::trace!(?kind, requests = task.requests, "coalesced frame request");
            return false;
        }

        self.pending.push(FrameTask {
            kind,
            requested_at: self.frame,
            requests: 1,
        });
        tracing::trace!(?kind, frame = self.frame, "scheduled for next frame");
        true
    }

    /// Drop a pending request without running it
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|task| task.kind != kind);
        before != self.pending.len()
    }

    /// Advance to the next frame and take every task that is now due.
    ///
    /// Marks the scheduler in flight until [`finish_frame`](Self::finish_frame).
    /// Returns nothing if a frame is already in flight.
    pub fn begin_frame(&mut self) -> SmallVec<[FrameTask<K>; 2]> {
        if self.in_flight {
            tracing::debug!(frame = self.frame, "frame already in flight, skipping");
            return SmallVec::new();
        }

        self.frame += 1;
        self.in_flight = true;

        let frame = self.frame;
        let (due, later): (SmallVec<[FrameTask<K>; 2]>, SmallVec<[FrameTask<K>; 2]>) = self
            .pending
            .drain(..)
            .partition(|task| task.requested_at < frame);
        self.pending = later;
        due
    }

    /// Release the in-flight guard
    pub fn finish_frame(&mut self) {
        self.in_flight = false;
    }
}

impl<K: Copy + Eq + std::fmt::Debug> Default for FrameScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}
