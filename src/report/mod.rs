//! Reporting utilities: run summaries and result previews.

pub mod format;

pub use format::*;
