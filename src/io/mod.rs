//! Input/output helpers.
//!
//! - coefficient, mean pole, EOP, site and Love-number readers
//! - result exports (CSV/JSON) (`export`)

pub mod coefficients;
pub mod eop;
pub mod export;
pub mod love;
pub mod mean_pole;
pub mod sites;
pub(crate) mod table;

pub use coefficients::*;
pub use eop::*;
pub use export::*;
pub use love::*;
pub use mean_pole::*;
pub use sites::*;
