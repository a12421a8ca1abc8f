//! Earth rotation collaborators: orientation providers and mean pole models.

pub mod mean_pole;
pub mod orientation;

pub use mean_pole::*;
pub use orientation::*;
