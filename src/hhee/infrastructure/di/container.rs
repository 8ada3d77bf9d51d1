// hhee_rdr/src/hhee/infrastructure/di/container.rs

//! # Collaborator Container
//!
//! Bundles the injected collaborators the lifecycle controller is built from.

use super::traits::{
    ConfigSource, DiagnosticFacility, InterruptController, ReliabilityRegistry, TaskSpawner,
};
use crate::util::firmware::FirmwareCall;
use alloc::sync::Arc;

/// The two independent diagnostic facilities brought up during attach.
#[derive(Clone)]
pub struct Diagnostics {
    /// Always initialized.
    pub logger: Arc<dyn DiagnosticFacility>,
    /// Initialized only when present; cleaned up on detach.
    pub debugfs: Option<Arc<dyn DiagnosticFacility>>,
}

#[derive(Clone)]
pub struct Collaborators {
    pub config: Arc<dyn ConfigSource>,
    pub registry: Arc<dyn ReliabilityRegistry>,
    pub irq: Arc<dyn InterruptController>,
    pub diagnostics: Diagnostics,
    pub spawner: Arc<dyn TaskSpawner>,
    /// Privileged call conduit to the secure monitor, if the platform has one.
    pub firmware: Option<Arc<dyn FirmwareCall>>,
}
