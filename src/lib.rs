// hhee_rdr/src/lib.rs

//! HHEE hardware-exception notification driver.
//!
//! The library is `no_std` and needs `alloc`. Everything platform specific
//! (interrupt controller, reliability registry, worker threads, diagnostics)
//! is injected through the traits in [`hhee::infrastructure::di`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod console;
pub mod hhee;
pub mod util;

#[cfg(test)]
mod test;

pub use hhee::{Attachment, DriverError, HheeDriver};
