//! Time tags.
//!
//! An [`Epoch`] is a count of seconds since J2000.0 (2000-01-01T12:00:00) on a
//! uniform time scale. The scale itself (TT, GPS, UTC without leap seconds) is
//! whatever the caller's orientation series uses; no conversion happens here.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{TideError, TideResult};
use crate::math::{DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_YEAR, MJD_J2000, SECONDS_PER_DAY};

/// Unix timestamp of J2000.0.
const J2000_UNIX_SECONDS: i64 = 946_728_000;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Epoch(f64);

impl Epoch {
    pub const J2000: Epoch = Epoch(0.0);

    pub fn from_seconds(seconds_since_j2000: f64) -> Self {
        Self(seconds_since_j2000)
    }

    pub fn from_mjd(mjd: f64) -> Self {
        Self((mjd - MJD_J2000) * SECONDS_PER_DAY)
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let utc = dt.and_utc();
        let whole = (utc.timestamp() - J2000_UNIX_SECONDS) as f64;
        Self(whole + f64::from(utc.timestamp_subsec_nanos()) * 1e-9)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn mjd(self) -> f64 {
        MJD_J2000 + self.0 / SECONDS_PER_DAY
    }

    /// Julian-year decimal date (`2000.0` at J2000.0).
    pub fn decimal_year(self) -> f64 {
        2000.0 + self.0 / (SECONDS_PER_DAY * DAYS_PER_JULIAN_YEAR)
    }

    pub fn julian_centuries(self) -> f64 {
        self.0 / (SECONDS_PER_DAY * DAYS_PER_JULIAN_CENTURY)
    }

    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        let whole = self.0.floor();
        let nanos = ((self.0 - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64 + J2000_UNIX_SECONDS, nanos).map(|d| d.naive_utc())
    }

    /// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` or `mjd:<value>`.
    pub fn parse(text: &str) -> TideResult<Self> {
        let text = text.trim();
        if let Some(mjd) = text.strip_prefix("mjd:") {
            let mjd: f64 = mjd
                .trim()
                .parse()
                .map_err(|_| TideError::configuration(format!("invalid MJD epoch '{text}'")))?;
            return Ok(Self::from_mjd(mjd));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Ok(Self::from_datetime(dt));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_datetime(dt));
            }
        }
        Err(TideError::configuration(format!(
            "invalid epoch '{text}' (expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or mjd:<value>)"
        )))
    }

    /// Evenly spaced epochs from `start` to `end` inclusive.
    pub fn series(start: Epoch, end: Epoch, step_seconds: f64) -> TideResult<Vec<Epoch>> {
        if !(step_seconds.is_finite() && step_seconds > 0.0) {
            return Err(TideError::configuration(format!(
                "time step must be positive, got {step_seconds}"
            )));
        }
        if end < start {
            return Err(TideError::configuration("end epoch precedes start epoch"));
        }
        let count = ((end.0 - start.0) / step_seconds + 1e-9).floor() as usize + 1;
        Ok((0..count)
            .map(|i| Epoch(start.0 + i as f64 * step_seconds))
            .collect())
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3f")),
            None => write!(f, "J2000{:+.3}s", self.0),
        }
    }
}
