// hhee_rdr/src/hhee/ds/error.rs

//! # Error Types
//!
//! Errors returned across the driver's collaborator seams, and the attach
//! status reported upward to the platform.

use core::fmt;

const ENXIO: i32 = 6;
const ENOMEM: i32 = 12;
const EBUSY: i32 = 16;
const EINVAL: i32 = 22;

/// Attach/detach failure reported to the platform.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The device context could not be allocated.
    OutOfMemory,
    /// The device exposes no interrupt line at the configured index.
    NoSuchDevice,
    /// A collaborator refused initialization (diagnostics, handler, worker).
    InvalidArgument,
    /// The device already has a live context.
    Busy,
}

impl DriverError {
    /// Negative errno value for the platform's probe status.
    pub const fn errno(self) -> i32 {
        match self {
            DriverError::OutOfMemory => -ENOMEM,
            DriverError::NoSuchDevice => -ENXIO,
            DriverError::InvalidArgument => -EINVAL,
            DriverError::Busy => -EBUSY,
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "out of memory allocating device context"),
            Self::NoSuchDevice => write!(f, "no such device or interrupt line"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Busy => write!(f, "device already attached"),
        }
    }
}

/// Registry refusal of a descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The module id range is already claimed by another registration.
    Duplicate,
    /// `module_id` is greater than `module_id_end`.
    InvalidRange,
    /// The registry is not accepting registrations.
    Unavailable,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "module id range already registered"),
            Self::InvalidRange => write!(f, "module id range is empty"),
            Self::Unavailable => write!(f, "registry unavailable"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IrqError {
    /// The line is unknown to the controller.
    InvalidLine,
    /// A handler is already installed on the line.
    Busy,
}

impl fmt::Display for IrqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine => write!(f, "unknown interrupt line"),
            Self::Busy => write!(f, "interrupt line already has a handler"),
        }
    }
}

/// A diagnostic facility (logger, debugfs) failed to initialize.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiagError {
    pub facility: &'static str,
}

impl fmt::Display for DiagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} initialization failed", self.facility)
    }
}

/// The execution context for the worker could not be created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SpawnError;

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to create worker context")
    }
}
