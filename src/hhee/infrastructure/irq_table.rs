// hhee_rdr/src/hhee/infrastructure/irq_table.rs

//! # Software Interrupt Table
//!
//! An `InterruptController` that maps device interrupt indices to lines and
//! dispatches a raised line to its installed handler. Platform interrupt entry
//! code calls [`IrqTable::raise`] with the line it decoded.

use super::di::{InterruptController, IrqHandler};
use crate::hhee::ds::{DeviceId, IrqError, IrqLine, IrqReturn};
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use log::{debug, warn};
use spin::{Mutex, RwLock};

struct InstalledHandler {
    handler: Arc<dyn IrqHandler>,
    name: &'static str,
}

/// Lines known to the table, each with at most one handler.
type LineMap = BTreeMap<IrqLine, Option<InstalledHandler>>;

pub struct IrqTable {
    assignments: Mutex<BTreeMap<(DeviceId, u32), IrqLine>>,
    lines: RwLock<LineMap>,
}

impl IrqTable {
    pub fn new() -> Self {
        Self {
            assignments: Mutex::new(BTreeMap::new()),
            lines: RwLock::new(BTreeMap::new()),
        }
    }

    /// Wires the `index`-th interrupt of `device` to `line`.
    pub fn assign(&self, device: DeviceId, index: u32, line: IrqLine) {
        self.assignments.lock().insert((device, index), line);
        self.lines.write().entry(line).or_insert(None);
    }

    /// Dispatches `line` to its handler.
    ///
    /// The read lock is held across the call so that `free_irq` cannot return
    /// while the handler is still running.
    pub fn raise(&self, line: IrqLine) -> IrqReturn {
        let lines = self.lines.read();
        match lines.get(&line) {
            Some(Some(installed)) => installed.handler.handle(line),
            _ => {
                warn!("spurious interrupt on {}", line);
                IrqReturn::None
            }
        }
    }

    pub fn handler_name(&self, line: IrqLine) -> Option<&'static str> {
        self.lines
            .read()
            .get(&line)
            .and_then(|slot| slot.as_ref().map(|installed| installed.name))
    }
}

impl Default for IrqTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptController for IrqTable {
    fn resolve_irq(&self, device: DeviceId, index: u32) -> Option<IrqLine> {
        self.assignments.lock().get(&(device, index)).copied()
    }

    fn install_handler(
        &self,
        line: IrqLine,
        handler: Arc<dyn IrqHandler>,
        name: &'static str,
    ) -> Result<(), IrqError> {
        let mut lines = self.lines.write();
        let slot = lines.get_mut(&line).ok_or(IrqError::InvalidLine)?;
        if slot.is_some() {
            return Err(IrqError::Busy);
        }
        *slot = Some(InstalledHandler { handler, name });
        debug!("installed {} on {}", name, line);
        Ok(())
    }

    fn free_irq(&self, line: IrqLine) {
        if let Some(slot) = self.lines.write().get_mut(&line) {
            if let Some(installed) = slot.take() {
                debug!("freed {} from {}", installed.name, line);
            }
        }
    }
}
