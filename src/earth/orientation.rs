//! Earth orientation providers.
//!
//! Tides only borrow a provider for the duration of a call; ownership stays
//! with the orchestrating caller.

use crate::domain::{EarthOrientationParameters, Epoch};
use crate::error::{TideError, TideResult};
use crate::math::{ARCSEC2RAD, TIO_LOCATOR_RATE_ARCSEC};

/// Source of Earth orientation parameters.
pub trait EarthOrientation: Send + Sync {
    fn earth_orientation_parameter(&self, time: Epoch) -> TideResult<EarthOrientationParameters>;
}

/// Provider returning the same parameters for every epoch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantOrientation {
    pub eop: EarthOrientationParameters,
}

impl ConstantOrientation {
    /// Frozen polar motion (radians), everything else zero.
    pub fn polar_motion(xp: f64, yp: f64) -> Self {
        Self {
            eop: EarthOrientationParameters {
                xp,
                yp,
                ..EarthOrientationParameters::default()
            },
        }
    }
}

impl EarthOrientation for ConstantOrientation {
    fn earth_orientation_parameter(&self, _time: Epoch) -> TideResult<EarthOrientationParameters> {
        Ok(self.eop)
    }
}

/// One tabulated EOP record.
///
/// Units as published in IERS series: pole in arcsec, UT1-UTC and LOD in s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EopRecord {
    pub mjd: f64,
    pub xp_arcsec: f64,
    pub yp_arcsec: f64,
    pub dut1: f64,
    pub lod: f64,
}

/// Linearly interpolated EOP series.
///
/// `sp` follows the conventional secular rate of the TIO locator; the
/// celestial pole offsets X, Y and s are not tabulated and returned as zero.
#[derive(Debug, Clone)]
pub struct TabulatedOrientation {
    records: Vec<EopRecord>,
}

impl TabulatedOrientation {
    /// Build from records in any order; duplicate epochs are rejected.
    pub fn new(mut records: Vec<EopRecord>) -> TideResult<Self> {
        if records.is_empty() {
            return Err(TideError::configuration("EOP series is empty"));
        }
        if records.iter().any(|r| {
            ![r.mjd, r.xp_arcsec, r.yp_arcsec, r.dut1, r.lod]
                .iter()
                .all(|v| v.is_finite())
        }) {
            return Err(TideError::configuration("EOP series contains non-finite values"));
        }
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        if let Some(dup) = records.windows(2).find(|w| w[0].mjd == w[1].mjd) {
            return Err(TideError::configuration(format!(
                "EOP series has duplicate epoch MJD {}",
                dup[0].mjd
            )));
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Covered MJD span.
    pub fn span(&self) -> (f64, f64) {
        (self.records[0].mjd, self.records[self.records.len() - 1].mjd)
    }

    fn interpolate(&self, mjd: f64) -> Option<EopRecord> {
        let (first, last) = self.span();
        if !(mjd >= first && mjd <= last) {
            return None;
        }
        let idx = self.records.partition_point(|r| r.mjd <= mjd);
        if idx == self.records.len() {
            return Some(self.records[idx - 1]);
        }
        let (a, b) = (&self.records[idx - 1], &self.records[idx]);
        let w = (mjd - a.mjd) / (b.mjd - a.mjd);
        let lerp = |va: f64, vb: f64| va + w * (vb - va);
        Some(EopRecord {
            mjd,
            xp_arcsec: lerp(a.xp_arcsec, b.xp_arcsec),
            yp_arcsec: lerp(a.yp_arcsec, b.yp_arcsec),
            dut1: lerp(a.dut1, b.dut1),
            lod: lerp(a.lod, b.lod),
        })
    }
}

impl EarthOrientation for TabulatedOrientation {
    fn earth_orientation_parameter(&self, time: Epoch) -> TideResult<EarthOrientationParameters> {
        let mjd = time.mjd();
        let record = self.interpolate(mjd).ok_or_else(|| {
            let (first, last) = self.span();
            TideError::Orientation {
                epoch: time.seconds(),
                message: format!("MJD {mjd:.5} outside tabulated span [{first}, {last}]"),
            }
        })?;
        Ok(EarthOrientationParameters {
            xp: record.xp_arcsec * ARCSEC2RAD,
            yp: record.yp_arcsec * ARCSEC2RAD,
            sp: TIO_LOCATOR_RATE_ARCSEC * time.julian_centuries() * ARCSEC2RAD,
            delta_ut1: record.dut1,
            lod: record.lod,
            x: 0.0,
            y: 0.0,
            s: 0.0,
        })
    }
}
