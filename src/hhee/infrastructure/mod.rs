// hhee_rdr/src/hhee/infrastructure/mod.rs

//! # HHEE Infrastructure Module
//!
//! The moving parts of the exception path: the injected collaborator
//! interfaces, the interrupt top half, the deferred worker, the registry
//! client, and reference collaborators for platforms that have none of their
//! own.

// The Dependency Injection (DI) framework.
pub mod di;

pub mod config;
pub mod context_table;

// Top half and bottom half.
pub mod irq_handler;
pub mod worker;

pub mod registry_client;

// Reference collaborators.
pub mod irq_table;
pub mod local_registry;

pub use self::config::{check_enabled, DriverConfig, StaticConfig};
pub use self::context_table::ContextTable;
pub use self::irq_handler::PanicIrqHandler;
pub use self::irq_table::IrqTable;
pub use self::local_registry::{LocalRegistry, ReportOutcome, ReportRecord};
pub use self::registry_client::RegistryClient;
pub use self::worker::PanicWorker;
