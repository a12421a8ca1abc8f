//! Secular (mean) pole models.
//!
//! The mean pole is a smooth trend of polar motion used as the baseline from
//! which the pole tide excitation is measured. Models are piecewise
//! polynomials in `dt = year - epoch`:
//!
//! ```text
//! xBar(t) = Σk x[k] · dt^k      yBar(t) = Σk y[k] · dt^k
//! ```
//!
//! The first segment whose `until` bound lies after the query year applies;
//! the last segment is open-ended and extrapolates indefinitely.

use serde::{Deserialize, Serialize};

use crate::domain::Epoch;
use crate::error::{TideError, TideResult};
use crate::math::MAS_PER_ARCSEC;

/// Unit of the polynomial coefficients in a mean pole model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoleUnit {
    #[default]
    Mas,
    Arcsec,
}

impl PoleUnit {
    fn to_arcsec(self, value: f64) -> f64 {
        match self {
            PoleUnit::Mas => value / MAS_PER_ARCSEC,
            PoleUnit::Arcsec => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeanPoleSegment {
    /// Exclusive upper bound (decimal year); `None` for the final segment.
    #[serde(default)]
    pub until: Option<f64>,
    /// Reference epoch of the polynomials (decimal year).
    pub epoch: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeanPoleModel {
    #[serde(default)]
    unit: PoleUnit,
    segments: Vec<MeanPoleSegment>,
}

impl MeanPoleModel {
    pub fn new(unit: PoleUnit, segments: Vec<MeanPoleSegment>) -> TideResult<Self> {
        let model = Self { unit, segments };
        model.check().map_err(TideError::configuration)?;
        Ok(model)
    }

    /// IERS Conventions 2010 mean pole (cubic until 2010.0, linear after).
    pub fn iers2010() -> Self {
        Self {
            unit: PoleUnit::Mas,
            segments: vec![
                MeanPoleSegment {
                    until: Some(2010.0),
                    epoch: 2000.0,
                    x: vec![55.974, 1.8243, 0.18413, 0.007024],
                    y: vec![346.346, 1.7896, -0.10729, -0.000908],
                },
                MeanPoleSegment {
                    until: None,
                    epoch: 2000.0,
                    x: vec![23.513, 7.6141],
                    y: vec![358.891, -0.6287],
                },
            ],
        }
    }

    /// IERS Conventions (2018 update) linear secular pole.
    pub fn iers2018() -> Self {
        Self {
            unit: PoleUnit::Mas,
            segments: vec![MeanPoleSegment {
                until: None,
                epoch: 2000.0,
                x: vec![55.0, 1.677],
                y: vec![320.5, 3.460],
            }],
        }
    }

    /// A fixed mean pole (arcsec).
    pub fn constant(x_bar: f64, y_bar: f64) -> Self {
        Self {
            unit: PoleUnit::Arcsec,
            segments: vec![MeanPoleSegment {
                until: None,
                epoch: 2000.0,
                x: vec![x_bar],
                y: vec![y_bar],
            }],
        }
    }

    pub fn segments(&self) -> &[MeanPoleSegment] {
        &self.segments
    }

    /// Mean pole `(xBar, yBar)` in arcseconds.
    pub fn compute(&self, time: Epoch) -> (f64, f64) {
        let year = time.decimal_year();
        let found = self.segments.iter().find(|s| s.until.is_none_or(|until| year < until));
        // Validated models always end with an open segment.
        let Some(segment) = found.or(self.segments.last()) else {
            return (0.0, 0.0);
        };

        let dt = year - segment.epoch;
        (
            self.unit.to_arcsec(horner(&segment.x, dt)),
            self.unit.to_arcsec(horner(&segment.y, dt)),
        )
    }

    /// Structural checks; the message is wrapped by the caller.
    pub(crate) fn check(&self) -> Result<(), String> {
        let Some(last) = self.segments.last() else {
            return Err("mean pole model has no segments".to_string());
        };
        if last.until.is_some() {
            return Err("the last mean pole segment must be open-ended (no `until`)".to_string());
        }
        let mut previous = f64::NEG_INFINITY;
        for (i, seg) in self.segments.iter().enumerate() {
            if seg.x.is_empty() || seg.y.is_empty() {
                return Err(format!("segment {i}: polynomial coefficients are empty"));
            }
            if !seg.epoch.is_finite() || seg.x.iter().chain(&seg.y).any(|c| !c.is_finite()) {
                return Err(format!("segment {i}: non-finite epoch or coefficient"));
            }
            if i + 1 < self.segments.len() {
                let Some(until) = seg.until else {
                    return Err(format!("segment {i}: only the last segment may be open-ended"));
                };
                if !(until.is_finite() && until > previous) {
                    return Err(format!("segment {i}: bounds must be strictly increasing"));
                }
                previous = until;
            }
        }
        Ok(())
    }
}

fn horner(coeffs: &[f64], dt: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * dt + c)
}
