// hhee_rdr/src/hhee/ds/mod.rs

//! # HHEE Data Structures Module
//!
//! Defines the core data structures of the exception path: the descriptor
//! table, identifier and state types, the per-device context, and errors.

pub mod types;
pub mod descriptor;
pub mod context;
pub mod error;

pub use self::types::{
    DeviceId, IrqLine, IrqReturn, WorkerState,
};

pub use self::descriptor::{
    ExceptionDescriptor, ModuleId, ProcessPriority, RebootPriority,
    ReentrantPolicy, UploadPolicy, CoreMask,
    HHEE_EXCEPTIONS, MODID_AP_S_HHEE_PANIC, AP_S_HHEE_PANIC, hhee_panic_descriptor,
};

pub use self::context::{
    DeviceContext, EventStats
};

pub use self::error::{
    DriverError, RegistryError, IrqError, DiagError, SpawnError,
};
