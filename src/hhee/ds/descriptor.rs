// hhee_rdr/src/hhee/ds/descriptor.rs

//! # Exception Descriptor Table
//!
//! Static metadata describing how the reliability registry must treat each
//! exception class raised by HHEE. The table is built at compile time and is
//! never mutated; the registry copies nothing out of it and keeps the
//! `&'static` reference instead.

use bitflags::bitflags;
use core::fmt;

/// Identifier of an exception class in the registry's namespace.
pub type ModuleId = u32;

/// Module id reported when the secure monitor signals a fatal condition.
pub const MODID_AP_S_HHEE_PANIC: ModuleId = 0x8000_0049;

/// Exception type code used by the registry to classify the report.
pub const AP_S_HHEE_PANIC: u32 = 0x1B;

/// Processing priority of a report relative to others in flight.
/// Lower value is processed first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProcessPriority {
    Error = 0x01,
    Warning = 0x02,
    Other = 0x03,
}

/// What the registry does with the system once the report is stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum RebootPriority {
    /// Reboot as soon as the report is persisted.
    Now = 0x01,
    /// Reboot once the pending report queue is drained.
    Wait = 0x02,
    /// Log only.
    No = 0x03,
}

impl RebootPriority {
    pub fn reboots(&self) -> bool {
        !matches!(self, RebootPriority::No)
    }
}

/// Whether several reports of one class may be in flight at once.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum ReentrantPolicy {
    Allow = 0xff00_da00,
    Disallow = 0xff00_da01,
}

/// Whether the report payload is persisted for offline diagnosis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum UploadPolicy {
    Yes = 0xff00_fa00,
    No = 0xff00_fa01,
}

bitflags! {
    /// Processing cores and domains that are notified of, reset by, or raise
    /// an exception.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct CoreMask: u32 {
        /// Application processor.
        const AP = 1 << 0;
        /// Communication processor.
        const CP = 1 << 1;
        /// Trusted OS.
        const TEEOS = 1 << 2;
        /// Audio DSP.
        const HIFI = 1 << 3;
        /// Low-power management core.
        const LPM3 = 1 << 4;
        /// Sensor hub.
        const IOM3 = 1 << 5;
        /// Image signal processor.
        const ISP = 1 << 6;
    }
}

/// # Exception Descriptor
///
/// One exception class as understood by the reliability registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionDescriptor {
    /// First module id covered by this descriptor.
    pub module_id: ModuleId,
    /// Last module id covered, inclusive.
    pub module_id_end: ModuleId,
    pub process_priority: ProcessPriority,
    pub reboot_priority: RebootPriority,
    pub notify_core_mask: CoreMask,
    pub reset_core_mask: CoreMask,
    pub from_core: CoreMask,
    pub reentrant: ReentrantPolicy,
    pub exception_type: u32,
    pub upload: UploadPolicy,
    pub from_module: &'static str,
    pub description: &'static str,
}

impl ExceptionDescriptor {
    /// `true` if `id` falls inside this descriptor's module id range.
    pub fn covers(&self, id: ModuleId) -> bool {
        self.module_id <= id && id <= self.module_id_end
    }

    /// `true` if both descriptors claim at least one common module id.
    pub fn overlaps(&self, other: &ExceptionDescriptor) -> bool {
        self.module_id <= other.module_id_end && other.module_id <= self.module_id_end
    }

    pub fn has_valid_range(&self) -> bool {
        self.module_id <= self.module_id_end
    }

    pub fn is_reentrant(&self) -> bool {
        self.reentrant == ReentrantPolicy::Allow
    }
}

impl fmt::Display for ExceptionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{:#x}..={:#x}] ({})",
            self.from_module, self.module_id, self.module_id_end, self.description
        )
    }
}

/// Exception classes registered by the HHEE driver.
pub static HHEE_EXCEPTIONS: [ExceptionDescriptor; 1] = [ExceptionDescriptor {
    module_id: MODID_AP_S_HHEE_PANIC,
    module_id_end: MODID_AP_S_HHEE_PANIC,
    process_priority: ProcessPriority::Error,
    reboot_priority: RebootPriority::Now,
    notify_core_mask: CoreMask::AP,
    reset_core_mask: CoreMask::AP,
    from_core: CoreMask::AP,
    reentrant: ReentrantPolicy::Disallow,
    exception_type: AP_S_HHEE_PANIC,
    upload: UploadPolicy::Yes,
    from_module: "RDR HHEE PANIC",
    description: "RDR HHEE PANIC",
}];

/// The descriptor for the HHEE panic interrupt.
pub fn hhee_panic_descriptor() -> &'static ExceptionDescriptor {
    &HHEE_EXCEPTIONS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_descriptor_policy() {
        let desc = hhee_panic_descriptor();
        assert_eq!(desc.module_id, MODID_AP_S_HHEE_PANIC);
        assert_eq!(desc.module_id, desc.module_id_end);
        assert_eq!(desc.reboot_priority, RebootPriority::Now);
        assert!(!desc.is_reentrant());
        assert_eq!(desc.upload, UploadPolicy::Yes);
        assert_eq!(desc.notify_core_mask, CoreMask::AP);
        assert_eq!(desc.reset_core_mask, CoreMask::AP);
    }

    #[test]
    fn range_overlap() {
        let a = hhee_panic_descriptor().clone();
        let mut b = a.clone();
        b.module_id = a.module_id + 1;
        b.module_id_end = a.module_id + 4;
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        b.module_id = a.module_id - 2;
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(b.covers(a.module_id));
    }
}
