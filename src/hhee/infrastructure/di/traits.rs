// hhee_rdr/src/hhee/infrastructure/di/traits.rs

//! # Dependency Injection Traits
//!
//! Defines the interfaces of everything the HHEE driver depends on but does
//! not own: configuration, the reliability registry, the interrupt controller,
//! diagnostic facilities, the worker execution context and the reset path.
//! The lifecycle controller only ever talks to these traits.

use crate::hhee::ds::{
    DeviceId, DiagError, ExceptionDescriptor, IrqError, IrqLine, IrqReturn, ModuleId,
    RegistryError, SpawnError,
};
use crate::hhee::sync::Parker;
use alloc::boxed::Box;
use alloc::sync::Arc;

/// Result of looking up a configuration property.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Property {
    /// No node with the compatible string, or no such property on it.
    Absent,
    /// The property exists but could not be read as a `u32`.
    Unreadable,
    U32(u32),
}

/// Interface for the configuration source (device tree or equivalent).
pub trait ConfigSource: Send + Sync {
    /// Reads `name` from the node matching `compatible`.
    fn property(&self, compatible: &str, name: &str) -> Property;
}

/// Interface for the system-wide reliability registry.
///
/// The registry serves many modules and is responsible for its own locking.
pub trait ReliabilityRegistry: Send + Sync {
    /// Registers an exception class. Overlapping module id ranges are refused.
    fn register(&self, descriptor: &'static ExceptionDescriptor) -> Result<(), RegistryError>;

    /// Files a report for `module_id`. May block, persist and reboot; never
    /// called from interrupt context.
    fn submit(&self, module_id: ModuleId, aux1: u64, aux2: u64);
}

/// An interrupt top half. Runs in interrupt context: must not block or
/// allocate.
pub trait IrqHandler: Send + Sync {
    fn handle(&self, line: IrqLine) -> IrqReturn;
}

/// Interface for the interrupt subsystem.
pub trait InterruptController: Send + Sync {
    /// Resolves the `index`-th interrupt of `device`.
    fn resolve_irq(&self, device: DeviceId, index: u32) -> Option<IrqLine>;

    /// Installs `handler` on `line`. On error nothing is left installed.
    fn install_handler(
        &self,
        line: IrqLine,
        handler: Arc<dyn IrqHandler>,
        name: &'static str,
    ) -> Result<(), IrqError>;

    /// Removes the handler from `line`. Once this returns the handler is not
    /// running and will not be invoked again.
    fn free_irq(&self, line: IrqLine);
}

/// An auxiliary diagnostic facility (HHEE logger, debugfs).
pub trait DiagnosticFacility: Send + Sync {
    fn name(&self) -> &'static str;

    fn init(&self) -> Result<(), DiagError>;

    fn cleanup(&self) {}
}

/// Work handed to a [`TaskSpawner`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Interface for creating the worker's execution context.
pub trait TaskSpawner: Send + Sync {
    /// A fresh parker for the next worker this spawner starts. The worker
    /// sleeps on it; the interrupt handler unparks it.
    fn parker(&self) -> Arc<dyn Parker>;

    fn spawn(&self, name: &'static str, task: Task) -> Result<Box<dyn WorkerHandle>, SpawnError>;
}

/// Handle on a spawned worker.
pub trait WorkerHandle: Send {
    /// Waits for the task to return.
    fn join(self: Box<Self>);
}

/// Interface for the reset path used by a registry once a report demands a
/// reboot.
pub trait SystemReset: Send + Sync {
    fn reboot(&self, descriptor: &ExceptionDescriptor);
}
