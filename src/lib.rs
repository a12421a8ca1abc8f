//! `ocean-pole-tide` library crate.
//!
//! Gravitational potential and site displacement caused by the ocean pole
//! tide. The binary (`poletide`) is a thin wrapper around this library so
//! that:
//!
//! - the tide model is testable without spawning processes
//! - the model can be embedded in larger geodetic processing chains

pub mod app;
pub mod cli;
pub mod domain;
pub mod earth;
pub mod error;
pub mod harmonics;
pub mod io;
pub mod math;
pub mod report;
pub mod tides;
