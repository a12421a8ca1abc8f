//! Numeric building blocks: unit constants and Legendre functions.

pub mod constants;
pub mod legendre;

pub use constants::*;
pub use legendre::*;
