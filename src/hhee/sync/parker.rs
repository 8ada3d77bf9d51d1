// hhee_rdr/src/hhee/sync/parker.rs

//! # Worker Parking
//!
//! How the worker sleeps while no panic is pending. The platform supplies a
//! [`Parker`] per worker through its `TaskSpawner`; the interrupt handler
//! unparks it after releasing the signal.

use core::marker::PhantomData;
use spin::relax::{RelaxStrategy, Spin};

/// A wakeup token for one worker.
///
/// An `unpark` that happens before `park` makes the next `park` return at
/// once, so a release racing the worker's last check is never lost.
pub trait Parker: Send + Sync {
    /// Sleeps until unparked. May return spuriously.
    fn park(&self);

    /// Wakes the parked worker. Runs in interrupt context: must not block.
    fn unpark(&self);
}

/// Busy-waits through `R` instead of sleeping.
///
/// For platforms with no scheduler to sleep on. The worker keeps its core
/// busy for the life of the attachment.
pub struct SpinParker<R: RelaxStrategy = Spin> {
    _relax: PhantomData<fn() -> R>,
}

impl<R: RelaxStrategy> SpinParker<R> {
    pub const fn new() -> Self {
        Self {
            _relax: PhantomData,
        }
    }
}

impl<R: RelaxStrategy> Default for SpinParker<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RelaxStrategy> Parker for SpinParker<R> {
    fn park(&self) {
        R::relax();
    }

    fn unpark(&self) {}
}
