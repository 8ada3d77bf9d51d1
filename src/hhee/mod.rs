// hhee_rdr/src/hhee/mod.rs

//! # HHEE Exception Notification
//!
//! Turns the HHEE panic interrupt into a report filed with the reliability
//! registry. The interrupt handler only releases a binary signal; a worker
//! waits on it and performs the (possibly rebooting) submission outside
//! interrupt context.

pub mod ds;
pub mod infrastructure;
pub mod sync;
mod api;

pub use self::api::*;

pub use self::ds::{
    DeviceId, IrqLine, IrqReturn, WorkerState,                 // Identifiers and states
    ExceptionDescriptor, ModuleId, HHEE_EXCEPTIONS,            // Descriptor table
    MODID_AP_S_HHEE_PANIC, AP_S_HHEE_PANIC,
    DeviceContext, EventStats,                                 // Per-device state
    DriverError, RegistryError, IrqError, DiagError, SpawnError,
};

pub use self::infrastructure::di::{
    Collaborators, ConfigSource, DiagnosticFacility, Diagnostics, InterruptController,
    Property, ReliabilityRegistry, SystemReset, TaskSpawner, WorkerHandle,
};

pub use self::infrastructure::{DriverConfig, IrqTable, LocalRegistry, StaticConfig};
pub use self::sync::{Parker, SpinParker};
