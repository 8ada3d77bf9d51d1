// hhee_rdr/src/hhee/sync/signal.rs

//! # Panic Signal
//!
//! A binary semaphore carrying at most one pending unit from the interrupt
//! handler to the worker, plus a stop flag used by teardown. `release` never
//! blocks and never allocates, so it is safe from interrupt context; a release
//! while a unit is already pending is coalesced into it.

use core::sync::atomic::{AtomicBool, Ordering};

/// Why a call to [`PanicSignal::wait_with`] returned.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wake {
    /// A pending unit was consumed.
    Signaled,
    /// Teardown requested a stop and nothing was pending.
    Stopped,
}

pub struct PanicSignal {
    pending: AtomicBool,
    stopped: AtomicBool,
}

impl PanicSignal {
    /// Creates a signal with count 0.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
        }
    }

    /// Adds one unit, saturating at 1.
    ///
    /// Returns `false` if a unit was already pending and this release was
    /// coalesced into it.
    pub fn release(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// Consumes the pending unit if there is one.
    pub fn try_acquire(&self) -> bool {
        self.pending
            .compare_exchange(true, false, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Asks the waiter to leave [`wait_with`](Self::wait_with). Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Blocks until a unit is available or a stop is requested, calling
    /// `idle` between checks.
    ///
    /// A unit pending at the moment the stop is observed is still delivered;
    /// `Stopped` is only returned once the signal is drained.
    pub fn wait_with(&self, mut idle: impl FnMut()) -> Wake {
        loop {
            if self.try_acquire() {
                return Wake::Signaled;
            }
            if self.is_stopped() {
                return if self.try_acquire() {
                    Wake::Signaled
                } else {
                    Wake::Stopped
                };
            }
            idle();
        }
    }
}

impl Default for PanicSignal {
    fn default() -> Self {
        Self::new()
    }
}
