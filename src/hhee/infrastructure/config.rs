// hhee_rdr/src/hhee/infrastructure/config.rs

//! # Driver Configuration
//!
//! Compile-time defaults for the HHEE driver and the enable check run once at
//! attach time against the platform's configuration source.

use super::di::{ConfigSource, Property};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use log::info;
use spin::RwLock;

/// Compatible string of the HHEE device node.
pub const HHEE_COMPATIBLE: &str = "hisi,hisi-hhee";
/// Property gating the whole exception path.
pub const HHEE_ENABLE_PROPERTY: &str = "hhee_enable";
/// Value of [`HHEE_ENABLE_PROPERTY`] meaning "enabled".
pub const HHEE_ENABLE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub compatible: &'static str,
    pub enable_property: &'static str,
    pub enable_value: u32,
    /// Index of the panic interrupt among the device's interrupts.
    pub irq_index: u32,
    /// Name the handler is installed under.
    pub irq_name: &'static str,
    /// Name of the worker's execution context.
    pub worker_name: &'static str,
    /// Maximum number of simultaneously attached devices.
    pub max_devices: usize,
}

impl DriverConfig {
    pub const fn new() -> Self {
        Self {
            compatible: HHEE_COMPATIBLE,
            enable_property: HHEE_ENABLE_PROPERTY,
            enable_value: HHEE_ENABLE,
            irq_index: 0,
            irq_name: "hisi-hhee",
            worker_name: "hhee_exception",
            max_devices: 1,
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether exception reporting is enabled.
///
/// A missing node or property, an unreadable value, or any value other than
/// the configured enable value all mean "disabled".
pub fn check_enabled(source: &dyn ConfigSource, config: &DriverConfig) -> bool {
    match source.property(config.compatible, config.enable_property) {
        Property::Absent => {
            info!("HHEE: no {} found", config.compatible);
            false
        }
        Property::Unreadable => {
            info!("HHEE: failed to read {}", config.enable_property);
            false
        }
        Property::U32(value) if value != config.enable_value => {
            info!("HHEE: disable, {} is {}", config.enable_property, value);
            false
        }
        Property::U32(_) => true,
    }
}

/// A map-backed `ConfigSource` for boards without a device tree.
pub struct StaticConfig {
    properties: RwLock<BTreeMap<(String, String), Property>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn set(&self, compatible: &str, name: &str, value: Property) {
        self.properties
            .write()
            .insert((compatible.to_string(), name.to_string()), value);
    }

    /// A source with `hhee_enable = <1>` on the HHEE node.
    pub fn hhee_enabled() -> Self {
        let config = Self::new();
        config.set(HHEE_COMPATIBLE, HHEE_ENABLE_PROPERTY, Property::U32(HHEE_ENABLE));
        config
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for StaticConfig {
    fn property(&self, compatible: &str, name: &str) -> Property {
        self.properties
            .read()
            .get(&(compatible.to_string(), name.to_string()))
            .copied()
            .unwrap_or(Property::Absent)
    }
}
