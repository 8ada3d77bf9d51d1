// hhee_rdr/src/hhee/infrastructure/di/mod.rs

//! # Dependency Injection
//!
//! Collaborator interfaces and the container handed to the lifecycle
//! controller. There is no global instance: each driver owns its container.

pub mod container;
pub mod traits;

pub use crate::hhee::sync::Parker;

pub use self::container::{Collaborators, Diagnostics};
pub use self::traits::{
    ConfigSource, DiagnosticFacility, InterruptController, IrqHandler, Property,
    ReliabilityRegistry, SystemReset, Task, TaskSpawner, WorkerHandle,
};
