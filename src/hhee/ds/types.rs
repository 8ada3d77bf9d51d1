// hhee_rdr/src/hhee/ds/types.rs

//! # Core Identifier and State Types
//!
//! Small value types shared by the handler, the worker and the lifecycle
//! controller: device and interrupt identifiers, the interrupt return code,
//! and the worker state machine.

use core::fmt;

/// Identifies one attached device instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dev{}", self.0)
    }
}

/// A resolved interrupt line number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqLine(pub u32);

impl fmt::Display for IrqLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "irq{}", self.0)
    }
}

/// What an interrupt handler reports back to the dispatcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IrqReturn {
    /// The interrupt was not raised by this handler's device.
    None,
    /// The interrupt was recognised and acknowledged.
    Handled,
}

/// # Worker State
///
/// `Waiting -> Processing -> Waiting` for every signal, and
/// `Waiting -> Terminated` once teardown raises the stop flag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Context allocated, worker not started yet.
    Idle = 0,
    /// Blocked on the panic signal.
    Waiting = 1,
    /// Submitting a report to the registry.
    Processing = 2,
    /// Stopped by teardown. Terminal.
    Terminated = 3,
}

impl WorkerState {
    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => WorkerState::Waiting,
            2 => WorkerState::Processing,
            3 => WorkerState::Terminated,
            _ => WorkerState::Idle,
        }
    }
}
