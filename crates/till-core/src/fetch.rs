//! Last-response-wins guard for fetch-and-replace.
//!
//! Rapid repeated refetches of the same collection race at the replace step:
//! nothing cancels a superseded in-flight request, so a stale response can
//! arrive after a newer one has already replaced the state. Each fetch takes
//! a ticket before it starts; its result may only replace state if no
//! newer ticket has been applied. A page that is torn down simply drops its
//! guard, discarding any still-in-flight result with it.

use tracing::debug;

/// A fetch's claim on the replace step, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Monotonic ticket issuer and replace gate for one collection.
#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    issued: u64,
    applied: u64,
}

impl FetchGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0, applied: 0 }
    }

    /// Claim a ticket for a fetch that is about to start.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Ask whether the fetch holding `ticket` may replace the collection.
    ///
    /// Returns `true` and records the ticket when it is newer than anything
    /// applied so far; returns `false` for a stale ticket, whose result the
    /// caller must discard.
    pub fn try_apply(&mut self, ticket: FetchTicket) -> bool {
        if ticket.0 > self.applied {
            self.applied = ticket.0;
            true
        } else {
            debug!(ticket = ticket.0, applied = self.applied, "stale fetch discarded");
            false
        }
    }
}
