//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - time tags (`Epoch`)
//! - orientation readings and evaluation sites
//! - tide and run configuration (`OceanPoleConfig`, `RunConfig`)

pub mod epoch;
pub mod types;

pub use epoch::*;
pub use types::*;
