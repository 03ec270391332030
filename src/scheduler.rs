//! Frame loop bookkeeping
//!
//! The host owns the actual "call me on the next paint" primitive
//! (`requestAnimationFrame` in the browser, a plain loop natively). This
//! module only decides which fired frames are allowed to run. Every request
//! carries a [`FrameTicket`]; a frame whose ticket is not the single pending
//! one is stale and must not touch the session.

/// Identifier the host uses for a platform frame request
pub type HostFrameId = i32;

/// Token for one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    generation: u64,
    seq: u64,
}

impl FrameTicket {
    /// Loop generation this ticket belongs to
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingFrame {
    ticket: FrameTicket,
    host_id: Option<HostFrameId>,
}

/// Single-slot recurring frame scheduler
///
/// Invariant: at most one ticket is pending. `start` and `cancel` both move
/// to a new generation, so nothing issued earlier can be accepted again.
#[derive(Debug, Default)]
pub struct Scheduler {
    generation: u64,
    seq: u64,
    pending: Option<PendingFrame>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current loop generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a frame is requested and not yet run
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin a new loop, invalidating every ticket issued before
    ///
    /// Returns the host id of a still-pending request the caller should cancel.
    pub fn start(&mut self) -> (FrameTicket, Option<HostFrameId>) {
        let stale = self.cancel();
        (self.issue(), stale)
    }

    /// Request the next frame of the current loop
    pub fn reschedule(&mut self) -> FrameTicket {
        self.issue()
    }

    fn issue(&mut self) -> FrameTicket {
        self.seq += 1;
        let ticket = FrameTicket {
            generation: self.generation,
            seq: self.seq,
        };
        self.pending = Some(PendingFrame {
            ticket,
            host_id: None,
        });
        ticket
    }

    /// Remember the platform id of the request made for `ticket`
    pub fn bind(&mut self, ticket: FrameTicket, host_id: HostFrameId) {
        match self.pending.as_mut() {
            Some(pending) if pending.ticket == ticket => pending.host_id = Some(host_id),
            _ => log::debug!("Ignoring host id {} for stale frame {:?}", host_id, ticket),
        }
    }

    /// Accept a fired frame; consumes the pending slot on success
    pub fn begin(&mut self, ticket: FrameTicket) -> bool {
        match self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Stop the loop; returns the host id to cancel, if one was bound
    pub fn cancel(&mut self) -> Option<HostFrameId> {
        self.generation += 1;
        self.pending.take().and_then(|p| p.host_id)
    }
}
