// hhee_rdr/src/hhee/sync/mod.rs

//! # Synchronization Primitives
//!
//! Lock-free primitives used on the interrupt-to-worker handoff path.

pub mod parker;
pub mod signal;

pub use self::parker::{Parker, SpinParker};
pub use self::signal::{PanicSignal, Wake};
