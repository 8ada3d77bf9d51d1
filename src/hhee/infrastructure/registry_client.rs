// hhee_rdr/src/hhee/infrastructure/registry_client.rs

//! # Reliability Registry Client
//!
//! Binds one exception descriptor to a registry. Registration is best-effort:
//! a refusal is logged and attach carries on, leaving reports for this class
//! to be dropped by the registry.

use super::di::ReliabilityRegistry;
use crate::hhee::ds::{ExceptionDescriptor, ModuleId};
use alloc::sync::Arc;
use log::{debug, error};

#[derive(Clone)]
pub struct RegistryClient {
    registry: Arc<dyn ReliabilityRegistry>,
    descriptor: &'static ExceptionDescriptor,
}

impl RegistryClient {
    pub fn new(registry: Arc<dyn ReliabilityRegistry>, descriptor: &'static ExceptionDescriptor) -> Self {
        Self { registry, descriptor }
    }

    pub fn descriptor(&self) -> &'static ExceptionDescriptor {
        self.descriptor
    }

    pub fn module_id(&self) -> ModuleId {
        self.descriptor.module_id
    }

    /// Registers the descriptor. Returns `false` on refusal.
    pub fn register(&self) -> bool {
        match self.registry.register(self.descriptor) {
            Ok(()) => {
                debug!("registered exception {}", self.descriptor);
                true
            }
            Err(e) => {
                error!("register hhee exception fail: {}", e);
                false
            }
        }
    }

    /// Files a report for this class. Worker context only.
    pub fn submit(&self, aux1: u64, aux2: u64) {
        self.registry.submit(self.descriptor.module_id, aux1, aux2);
    }
}
