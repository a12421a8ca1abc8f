//! Pole tide excitation and admittance weights.
//!
//! The excitation pair is the offset of the instantaneous pole from the mean
//! pole (IERS Conventions 2010, eq. 7.24):
//!
//! ```text
//! m1 =   xp - xBar
//! m2 = -(yp - yBar)
//! ```
//!
//! in arcseconds. Both the potential and the displacement are weighted by
//! the same pair of admittance weights; [`admittance_weights`] is the single
//! place where they are formed.

use serde::Serialize;

use crate::domain::{EarthOrientationParameters, Epoch};
use crate::math::{ARCSEC2RAD, RAD2ARCSEC};

/// Excitation pair `(m1, m2)` in arcseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Excitation {
    pub m1: f64,
    pub m2: f64,
}

/// Weights of the real and imaginary coefficient sets (dimensionless).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AdmittanceWeights {
    pub real: f64,
    pub imag: f64,
}

/// Excitation from an orientation reading and the mean pole (arcsec).
pub fn pole_excitation(eop: &EarthOrientationParameters, mean_pole: (f64, f64)) -> Excitation {
    let (x_bar, y_bar) = mean_pole;
    Excitation {
        m1: eop.xp * RAD2ARCSEC - x_bar,
        m2: -(eop.yp * RAD2ARCSEC - y_bar),
    }
}

/// `wReal = (m1 γR + m2 γI)·arcsec2rad`, `wImag = (m2 γR − m1 γI)·arcsec2rad`.
pub fn admittance_weights(excitation: Excitation, gamma_real: f64, gamma_imag: f64) -> AdmittanceWeights {
    let Excitation { m1, m2 } = excitation;
    AdmittanceWeights {
        real: (m1 * gamma_real + m2 * gamma_imag) * ARCSEC2RAD,
        imag: (m2 * gamma_real - m1 * gamma_imag) * ARCSEC2RAD,
    }
}

/// One row of an excitation time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExcitationSample {
    pub epoch: Epoch,
    pub excitation: Excitation,
    pub weights: AdmittanceWeights,
}
