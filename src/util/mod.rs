// hhee_rdr/src/util/mod.rs

//! Platform utilities.

pub mod firmware;
