// hhee_rdr/src/hhee/infrastructure/context_table.rs

//! # Device Context Table
//!
//! Owns the live `DeviceContext` of every attached device. Allocation is
//! bounded by a fixed capacity so that exhaustion surfaces as an attach error
//! instead of an allocator abort, and a device can hold at most one context.

use crate::hhee::ds::{DeviceContext, DeviceId, DriverError};
use crate::hhee::sync::Parker;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use spin::Mutex;

pub struct ContextTable {
    capacity: usize,
    contexts: Mutex<BTreeMap<DeviceId, Arc<DeviceContext>>>,
}

impl ContextTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            contexts: Mutex::new(BTreeMap::new()),
        }
    }

    /// Allocates a fresh context for `device` whose worker sleeps on `parker`.
    pub fn alloc(
        &self,
        device: DeviceId,
        parker: Arc<dyn Parker>,
    ) -> Result<Arc<DeviceContext>, DriverError> {
        let mut contexts = self.contexts.lock();
        if contexts.contains_key(&device) {
            return Err(DriverError::Busy);
        }
        if contexts.len() >= self.capacity {
            return Err(DriverError::OutOfMemory);
        }

        let context = Arc::new(DeviceContext::new(device, parker));
        contexts.insert(device, Arc::clone(&context));
        Ok(context)
    }

    /// Releases the context of `device`. Clones still held elsewhere stay
    /// valid until dropped.
    pub fn free(&self, device: DeviceId) -> Option<Arc<DeviceContext>> {
        self.contexts.lock().remove(&device)
    }

    pub fn get(&self, device: DeviceId) -> Option<Arc<DeviceContext>> {
        self.contexts.lock().get(&device).cloned()
    }

    pub fn len(&self) -> usize {
        self.contexts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
