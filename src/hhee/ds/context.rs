// hhee_rdr/src/hhee/ds/context.rs

//! # Device Context
//!
//! Per-device state shared between the interrupt handler and the worker. The
//! lifecycle controller owns it through its context table; the handler and the
//! worker each hold an `Arc` clone for the lifetime of the attachment.

use super::types::{DeviceId, WorkerState};
use crate::hhee::sync::{PanicSignal, Parker, Wake};
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Counters describing what happened on one attachment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct EventStats {
    /// Interrupts taken by the handler.
    pub raised: u64,
    /// Interrupts merged into an already pending signal.
    pub coalesced: u64,
    /// Reports submitted to the registry by the worker.
    pub reported: u64,
}

pub struct DeviceContext {
    device: DeviceId,
    panic_signal: PanicSignal,
    parker: Arc<dyn Parker>,
    state: AtomicU8,
    raised: AtomicU64,
    coalesced: AtomicU64,
    reported: AtomicU64,
}

impl DeviceContext {
    /// Creates the context with the signal at count 0 and the worker idle.
    /// `parker` is what the worker sleeps on.
    pub fn new(device: DeviceId, parker: Arc<dyn Parker>) -> Self {
        Self {
            device,
            panic_signal: PanicSignal::new(),
            parker,
            state: AtomicU8::new(WorkerState::Idle as u8),
            raised: AtomicU64::new(0),
            coalesced: AtomicU64::new(0),
            reported: AtomicU64::new(0),
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn panic_signal(&self) -> &PanicSignal {
        &self.panic_signal
    }

    pub fn worker_state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_worker_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Releases the signal from the interrupt handler and wakes the worker.
    ///
    /// Returns `false` if a unit was already pending; the interrupt is then
    /// merged into it and the worker, already woken for it, is left alone.
    pub fn signal_panic(&self) -> bool {
        let fresh = self.panic_signal.release();
        self.raised.fetch_add(1, Ordering::Relaxed);
        if fresh {
            self.parker.unpark();
        } else {
            self.coalesced.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    /// Tells the worker to finish. A pending unit is still processed first.
    pub fn request_stop(&self) {
        self.panic_signal.stop();
        self.parker.unpark();
    }

    /// Sleeps on the parker until a unit is pending or a stop is requested.
    pub(crate) fn wait_for_panic(&self) -> Wake {
        self.panic_signal.wait_with(|| self.parker.park())
    }

    pub(crate) fn note_reported(&self) {
        self.reported.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> EventStats {
        EventStats {
            raised: self.raised.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            reported: self.reported.load(Ordering::Relaxed),
        }
    }
}

impl core::fmt::Debug for DeviceContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceContext")
            .field("device", &self.device)
            .field("pending", &self.panic_signal.is_pending())
            .field("state", &self.worker_state())
            .field("stats", &self.stats())
            .finish()
    }
}
