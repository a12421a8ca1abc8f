//! Unit-conversion and reference constants.
//!
//! Every angle conversion in the crate goes through these names so the
//! potential and deformation paths cannot drift apart.

use std::f64::consts::PI;

pub const DEG2RAD: f64 = PI / 180.0;
pub const RAD2DEG: f64 = 180.0 / PI;

/// Radians to arcseconds (`180·3600/π`).
pub const RAD2ARCSEC: f64 = RAD2DEG * 3600.0;
/// Arcseconds to radians (`π/(180·3600)`).
pub const ARCSEC2RAD: f64 = DEG2RAD / 3600.0;

pub const MAS_PER_ARCSEC: f64 = 1000.0;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// MJD of J2000.0 (2000-01-01T12:00:00).
pub const MJD_J2000: f64 = 51_544.5;

/// Default geocentric gravitational constant (m³/s²).
pub const DEFAULT_GM: f64 = 3.986_004_415e14;
/// Default reference radius (m).
pub const DEFAULT_R: f64 = 6_378_136.3;

/// Secular drift of the TIO locator s' (arcsec per Julian century).
pub const TIO_LOCATOR_RATE_ARCSEC: f64 = -47e-6;
