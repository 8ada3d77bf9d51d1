// hhee_rdr/src/util/firmware.rs

//! # Secure Monitor Call Interface
//!
//! Privileged calls into the firmware layer hosting HHEE. The exception path
//! never uses them; they expose the monitor's version for diagnostics. A
//! conduit is provided per architecture: `hvc #0` on AArch64 and an SBI vendor
//! extension `ecall` on RISC-V.

use core::fmt;

/// Standard service call returning the monitor's revision.
pub const ARM_STD_HVC_VERSION: u32 = 0x8400_FF03;

/// Result type for firmware calls.
pub type FirmwareResult<T> = Result<T, FirmwareError>;

/// Error codes returned in the first result register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FirmwareError {
    NotSupported,
    NotRequired,
    InvalidParameter,
    Denied,
    Unknown(i64),
}

impl FirmwareError {
    /// Decodes a raw return value; non-negative values are successes.
    pub fn check(ret: i64) -> FirmwareResult<u64> {
        match ret {
            r if r >= 0 => Ok(r as u64),
            -1 => Err(FirmwareError::NotSupported),
            -2 => Err(FirmwareError::NotRequired),
            -3 => Err(FirmwareError::InvalidParameter),
            -4 => Err(FirmwareError::Denied),
            other => Err(FirmwareError::Unknown(other)),
        }
    }
}

impl fmt::Display for FirmwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FirmwareError::NotSupported => write!(f, "Call not supported"),
            FirmwareError::NotRequired => write!(f, "Call not required"),
            FirmwareError::InvalidParameter => write!(f, "Invalid parameter"),
            FirmwareError::Denied => write!(f, "Access denied"),
            FirmwareError::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// A conduit to the secure monitor.
pub trait FirmwareCall: Send + Sync {
    /// Issues call `fid` and returns the raw first result register.
    fn call(&self, fid: u32, args: [u64; 3]) -> i64;
}

/// Monitor revision.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HheeVersion {
    pub major: u16,
    pub minor: u16,
}

impl fmt::Display for HheeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Queries the monitor revision. Major in bits 31:16, minor in bits 15:0.
pub fn hhee_version(conduit: &dyn FirmwareCall) -> FirmwareResult<HheeVersion> {
    let raw = FirmwareError::check(conduit.call(ARM_STD_HVC_VERSION, [0, 0, 0]))?;
    Ok(HheeVersion {
        major: (raw >> 16) as u16,
        minor: (raw & 0xFFFF) as u16,
    })
}

#[cfg(target_arch = "aarch64")]
pub use self::aarch64::HvcConduit;

#[cfg(target_arch = "aarch64")]
mod aarch64 {
    use super::FirmwareCall;
    use core::arch::asm;

    /// Calls the monitor with `hvc #0`.
    pub struct HvcConduit;

    impl FirmwareCall for HvcConduit {
        fn call(&self, fid: u32, args: [u64; 3]) -> i64 {
            let ret0: u64;
            unsafe {
                asm!(
                    "hvc #0",
                    inout("x0") fid as u64 => ret0,
                    inout("x1") args[0] => _,
                    inout("x2") args[1] => _,
                    inout("x3") args[2] => _,
                    // x4-x17 are clobbered by the call
                    out("x4") _, out("x5") _, out("x6") _, out("x7") _,
                    out("x8") _, out("x9") _, out("x10") _, out("x11") _,
                    out("x12") _, out("x13") _, out("x14") _, out("x15") _,
                    out("x16") _, out("x17") _,
                    options(nomem, nostack)
                );
            }
            ret0 as i64
        }
    }
}

#[cfg(target_arch = "riscv64")]
pub use self::riscv::{SbiConduit, SbiSystemReset};

#[cfg(target_arch = "riscv64")]
mod riscv {
    use super::FirmwareCall;
    use crate::hhee::ds::ExceptionDescriptor;
    use crate::hhee::infrastructure::di::SystemReset;
    use core::arch::asm;
    use log::error;

    /// SBI vendor extension routed to the monitor.
    const HHEE_SBI_EXTENSION: usize = 0x0900_4848;
    /// System reset extension ("SRST").
    const SRST_EXTENSION: usize = 0x5352_5354;
    const RESET_TYPE_COLD_REBOOT: usize = 1;
    const RESET_REASON_SYSTEM_FAILURE: usize = 1;

    fn sbi_call(eid: usize, fid: usize, args: [usize; 3]) -> (isize, usize) {
        let error: isize;
        let value: usize;
        unsafe {
            asm!(
                "ecall",
                in("a7") eid,
                in("a6") fid,
                inlateout("a0") args[0] => error,
                inlateout("a1") args[1] => value,
                in("a2") args[2],
            );
        }
        (error, value)
    }

    /// Reaches the monitor through an SBI vendor extension; the function id
    /// is passed unchanged.
    pub struct SbiConduit;

    impl FirmwareCall for SbiConduit {
        fn call(&self, fid: u32, args: [u64; 3]) -> i64 {
            let (error, value) = sbi_call(
                HHEE_SBI_EXTENSION,
                fid as usize,
                [args[0] as usize, args[1] as usize, args[2] as usize],
            );
            if error != 0 {
                error as i64
            } else {
                value as i64
            }
        }
    }

    /// Cold reboot through SBI SRST, with legacy shutdown as fallback.
    pub struct SbiSystemReset;

    impl SystemReset for SbiSystemReset {
        fn reboot(&self, descriptor: &ExceptionDescriptor) {
            error!("rdr: rebooting for {}", descriptor.description);
            let _ = sbi_call(
                SRST_EXTENSION,
                0,
                [RESET_TYPE_COLD_REBOOT, RESET_REASON_SYSTEM_FAILURE, 0],
            );
            sbi_rt::legacy::shutdown();
        }
    }
}
