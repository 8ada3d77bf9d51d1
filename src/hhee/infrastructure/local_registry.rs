// hhee_rdr/src/hhee/infrastructure/local_registry.rs

//! # In-Process Reliability Registry
//!
//! A `ReliabilityRegistry` for platforms without a separate RDR service. It
//! enforces module id uniqueness at registration, applies each class's
//! reentrancy policy at submission, keeps a bounded history of reports and
//! hands off to a `SystemReset` when a class demands a reboot.

use super::di::{ReliabilityRegistry, SystemReset};
use crate::hhee::ds::{ExceptionDescriptor, ModuleId, RegistryError, UploadPolicy};
use alloc::collections::{BTreeMap, VecDeque};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use log::{error, info, warn};
use spin::{Mutex, RwLock};

pub const REPORT_HISTORY_CAPACITY: usize = 64;

/// What the registry did with one submission.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Recorded; the class does not reboot, or a reboot is already under way.
    Stored,
    /// Recorded and the reset path was invoked.
    Rebooted,
    /// No registered class covers the module id.
    Unregistered,
    /// A report of this non-reentrant class was already in flight.
    Reentrant,
}

/// One entry of the report history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub sequence: u64,
    pub module_id: ModuleId,
    pub aux1: u64,
    pub aux2: u64,
    pub exception_type: Option<u32>,
    /// The class asked for the payload to be persisted.
    pub upload: bool,
    pub outcome: ReportOutcome,
}

struct Registration {
    descriptor: &'static ExceptionDescriptor,
    in_flight: AtomicBool,
}

pub struct LocalRegistry {
    /// Keyed by the first module id of each registered range.
    registrations: RwLock<BTreeMap<ModuleId, Arc<Registration>>>,
    history: Mutex<VecDeque<ReportRecord>>,
    reset: Option<Arc<dyn SystemReset>>,
    sequence: AtomicU64,
    rebooting: AtomicBool,
}

impl LocalRegistry {
    /// Creates a registry that records reports but never resets.
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(BTreeMap::new()),
            history: Mutex::new(VecDeque::with_capacity(REPORT_HISTORY_CAPACITY)),
            reset: None,
            sequence: AtomicU64::new(0),
            rebooting: AtomicBool::new(false),
        }
    }

    pub fn with_reset(reset: Arc<dyn SystemReset>) -> Self {
        Self {
            reset: Some(reset),
            ..Self::new()
        }
    }

    fn lookup(&self, module_id: ModuleId) -> Option<Arc<Registration>> {
        let registrations = self.registrations.read();
        let found = registrations
            .range(..=module_id)
            .next_back()
            .filter(|(_, reg)| reg.descriptor.covers(module_id))
            .map(|(_, reg)| Arc::clone(reg));
        found
    }

    fn record(&self, record: ReportRecord) {
        let mut history = self.history.lock();
        if history.len() == REPORT_HISTORY_CAPACITY {
            history.pop_front();
        }
        history.push_back(record);
    }

    /// Registered descriptors, highest processing priority first.
    pub fn descriptors(&self) -> Vec<&'static ExceptionDescriptor> {
        let mut descriptors: Vec<_> = self
            .registrations
            .read()
            .values()
            .map(|reg| reg.descriptor)
            .collect();
        descriptors.sort_by_key(|d| (d.process_priority, d.module_id));
        descriptors
    }

    /// Reports in submission order, oldest first.
    pub fn history(&self) -> Vec<ReportRecord> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn is_rebooting(&self) -> bool {
        self.rebooting.load(Ordering::Acquire)
    }

    /// Files a report and returns what was done with it.
    pub fn submit_report(&self, module_id: ModuleId, aux1: u64, aux2: u64) -> ReportOutcome {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let mut record = ReportRecord {
            sequence,
            module_id,
            aux1,
            aux2,
            exception_type: None,
            upload: false,
            outcome: ReportOutcome::Unregistered,
        };

        let registration = match self.lookup(module_id) {
            Some(reg) => reg,
            None => {
                warn!("rdr: report for unregistered module {:#x} dropped", module_id);
                self.record(record);
                return ReportOutcome::Unregistered;
            }
        };
        let descriptor = registration.descriptor;
        record.exception_type = Some(descriptor.exception_type);
        record.upload = descriptor.upload == UploadPolicy::Yes;

        if !descriptor.is_reentrant() && registration.in_flight.swap(true, Ordering::AcqRel) {
            warn!("rdr: {} already in flight, report dropped", descriptor.from_module);
            record.outcome = ReportOutcome::Reentrant;
            self.record(record);
            return ReportOutcome::Reentrant;
        }

        error!(
            "rdr: {} module {:#x} type {:#x} aux [{:#x}, {:#x}]",
            descriptor.from_module, module_id, descriptor.exception_type, aux1, aux2
        );

        let outcome = if descriptor.reboot_priority.reboots()
            && !self.rebooting.swap(true, Ordering::AcqRel)
        {
            ReportOutcome::Rebooted
        } else {
            ReportOutcome::Stored
        };
        record.outcome = outcome;
        self.record(record);

        if outcome == ReportOutcome::Rebooted {
            match &self.reset {
                Some(reset) => reset.reboot(descriptor),
                None => info!("rdr: no reset path, {} left running", descriptor.description),
            }
        }

        if !descriptor.is_reentrant() {
            registration.in_flight.store(false, Ordering::Release);
        }
        outcome
    }
}

impl Default for LocalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ReliabilityRegistry for LocalRegistry {
    fn register(&self, descriptor: &'static ExceptionDescriptor) -> Result<(), RegistryError> {
        if !descriptor.has_valid_range() {
            return Err(RegistryError::InvalidRange);
        }

        let mut registrations = self.registrations.write();
        if registrations
            .values()
            .any(|reg| reg.descriptor.overlaps(descriptor))
        {
            return Err(RegistryError::Duplicate);
        }

        registrations.insert(
            descriptor.module_id,
            Arc::new(Registration {
                descriptor,
                in_flight: AtomicBool::new(false),
            }),
        );
        info!("rdr: registered {}", descriptor);
        Ok(())
    }

    fn submit(&self, module_id: ModuleId, aux1: u64, aux2: u64) {
        self.submit_report(module_id, aux1, aux2);
    }
}
