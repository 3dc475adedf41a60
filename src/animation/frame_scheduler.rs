// src/animation/frame_scheduler.rs
//
// The host's "call me on the next paint" primitive, injected into the
// animation scheduler as a capability.

use std::collections::BTreeSet;

/// Handle for one pending frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequest(pub u64);

pub trait FrameScheduler {
    /// Asks for a single callback at the next paint opportunity.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraws a request. Cancelling a request that already fired is a no-op.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// A FrameScheduler pumped by the host: every native frame the host takes
/// the due request (if any) and calls back into the animation.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: BTreeSet<FrameRequest>,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending request.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_first()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of requests withdrawn before they fired.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id);
        self.next_id += 1;
        self.pending.insert(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending.remove(&request) {
            self.cancelled += 1;
        }
    }
}
