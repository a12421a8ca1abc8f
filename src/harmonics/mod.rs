//! Spherical-harmonic coefficient fields.

pub mod field;

pub use field::*;
