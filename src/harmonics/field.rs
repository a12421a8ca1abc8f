//! Dense spherical-harmonic coefficient field.
//!
//! The potential represented by a field is
//!
//! ```text
//! V(r, θ, λ) = GM/R Σn (R/r)^(n+1) Σm P̄nm(cos θ) (Cnm cos mλ + Snm sin mλ)
//! ```
//!
//! Coefficients are stored in square lower-triangular matrices indexed
//! `(n, m)`. Degrees below `min_degree` are kept as explicit zeros so the
//! indexing is the same for every field.

use std::ops::{Add, Mul};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{TideError, TideResult};
use crate::math::LegendreTable;

/// Target degree range and reference constants for [`SphericalHarmonics::get`].
///
/// `None` keeps the source field's value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HarmonicsRequest {
    pub max_degree: Option<usize>,
    pub min_degree: usize,
    pub gm: Option<f64>,
    pub r: Option<f64>,
}

impl HarmonicsRequest {
    pub fn degrees(min_degree: usize, max_degree: Option<usize>) -> Self {
        Self {
            max_degree,
            min_degree,
            ..Self::default()
        }
    }

    pub fn with_reference(mut self, gm: f64, r: f64) -> Self {
        self.gm = Some(gm);
        self.r = Some(r);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphericalHarmonics {
    gm: f64,
    r: f64,
    min_degree: usize,
    cnm: DMatrix<f64>,
    snm: DMatrix<f64>,
}

impl SphericalHarmonics {
    /// Build a field from dense coefficient matrices.
    ///
    /// Entries above the diagonal, `S_n0`, and degrees below `min_degree` are
    /// cleared.
    pub fn new(gm: f64, r: f64, cnm: DMatrix<f64>, snm: DMatrix<f64>) -> TideResult<Self> {
        Self::with_min_degree(gm, r, 0, cnm, snm)
    }

    pub fn with_min_degree(
        gm: f64,
        r: f64,
        min_degree: usize,
        mut cnm: DMatrix<f64>,
        mut snm: DMatrix<f64>,
    ) -> TideResult<Self> {
        if !(gm.is_finite() && gm > 0.0 && r.is_finite() && r > 0.0) {
            return Err(TideError::configuration(format!(
                "reference constants must be positive: GM={gm}, R={r}"
            )));
        }
        if !cnm.is_square() || cnm.shape() != snm.shape() || cnm.nrows() == 0 {
            return Err(TideError::configuration(format!(
                "coefficient matrices must be square and equal in shape: cnm {:?}, snm {:?}",
                cnm.shape(),
                snm.shape()
            )));
        }
        let size = cnm.nrows();
        for n in 0..size {
            snm[(n, 0)] = 0.0;
            for m in 0..size {
                if m > n || n < min_degree {
                    cnm[(n, m)] = 0.0;
                    snm[(n, m)] = 0.0;
                }
            }
        }
        Ok(Self {
            gm,
            r,
            min_degree: min_degree.min(size - 1),
            cnm,
            snm,
        })
    }

    /// All-zero field up to `max_degree`.
    pub fn zeros(gm: f64, r: f64, max_degree: usize) -> TideResult<Self> {
        let size = max_degree + 1;
        Self::new(gm, r, DMatrix::zeros(size, size), DMatrix::zeros(size, size))
    }

    pub fn gm(&self) -> f64 {
        self.gm
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    pub fn max_degree(&self) -> usize {
        self.cnm.nrows() - 1
    }

    pub fn cnm(&self) -> &DMatrix<f64> {
        &self.cnm
    }

    pub fn snm(&self) -> &DMatrix<f64> {
        &self.snm
    }

    /// Truncate to `[min, max]` and rescale to another GM/R.
    ///
    /// Requesting a maximum degree above the native one zero-pads. Rescaling
    /// keeps the represented potential unchanged:
    /// `C'nm = Cnm · (GM/GM') · (R/R')^n`.
    pub fn get(&self, request: &HarmonicsRequest) -> SphericalHarmonics {
        let max_degree = request.max_degree.unwrap_or(self.max_degree());
        let min_degree = request.min_degree.max(self.min_degree);
        let gm = request.gm.unwrap_or(self.gm);
        let r = request.r.unwrap_or(self.r);

        let size = max_degree + 1;
        let mut cnm = DMatrix::<f64>::zeros(size, size);
        let mut snm = DMatrix::<f64>::zeros(size, size);

        let gm_ratio = self.gm / gm;
        let r_ratio = self.r / r;
        let top = max_degree.min(self.max_degree());
        let mut radial = r_ratio.powi(min_degree as i32);
        for n in min_degree..=top {
            let scale = gm_ratio * radial;
            for m in 0..=n {
                cnm[(n, m)] = self.cnm[(n, m)] * scale;
                snm[(n, m)] = self.snm[(n, m)] * scale;
            }
            radial *= r_ratio;
        }

        SphericalHarmonics {
            gm,
            r,
            min_degree: min_degree.min(max_degree),
            cnm,
            snm,
        }
    }

    /// Multiply every coefficient by `factor`.
    pub fn scaled(&self, factor: f64) -> SphericalHarmonics {
        SphericalHarmonics {
            cnm: &self.cnm * factor,
            snm: &self.snm * factor,
            ..self.clone()
        }
    }

    /// Coefficient vector in operator column order.
    ///
    /// For each degree `n`: `C_n0`, then `C_nm, S_nm` for `m = 1..=n`.
    pub fn to_vector(&self) -> DVector<f64> {
        let size = self.cnm.nrows();
        let mut x = DVector::<f64>::zeros(size * size);
        for n in 0..size {
            for m in 0..=n {
                x[coefficient_index(n, m, true)] = self.cnm[(n, m)];
                if m > 0 {
                    x[coefficient_index(n, m, false)] = self.snm[(n, m)];
                }
            }
        }
        x
    }

    /// Potential at an Earth-fixed position (m).
    pub fn potential(&self, position: &nalgebra::Vector3<f64>) -> f64 {
        let r = position.norm();
        let rho = position.xy().norm();
        let (cos_theta, sin_theta) = (position.z / r, rho / r);
        let lambda = position.y.atan2(position.x);
        let legendre = LegendreTable::new(self.max_degree(), cos_theta, sin_theta);

        let mut sum = 0.0;
        let mut radial = (self.r / r).powi(self.min_degree as i32 + 1);
        for n in self.min_degree..=self.max_degree() {
            let mut degree_sum = 0.0;
            for m in 0..=n {
                let (sin_ml, cos_ml) = (m as f64 * lambda).sin_cos();
                degree_sum += legendre.p(n, m) * (self.cnm[(n, m)] * cos_ml + self.snm[(n, m)] * sin_ml);
            }
            sum += radial * degree_sum;
            radial *= self.r / r;
        }
        self.gm / self.r * sum
    }
}

/// Position of `C_nm` (`cosine = true`) or `S_nm` in the coefficient vector.
#[inline]
pub fn coefficient_index(n: usize, m: usize, cosine: bool) -> usize {
    if m == 0 {
        n * n
    } else if cosine {
        n * n + 2 * m - 1
    } else {
        n * n + 2 * m
    }
}

impl Mul<f64> for &SphericalHarmonics {
    type Output = SphericalHarmonics;

    fn mul(self, factor: f64) -> SphericalHarmonics {
        self.scaled(factor)
    }
}

impl Add for &SphericalHarmonics {
    type Output = SphericalHarmonics;

    /// Sum of two fields; the right-hand side is converted to the left-hand
    /// side's reference constants and the larger degree range is kept.
    fn add(self, rhs: &SphericalHarmonics) -> SphericalHarmonics {
        let max_degree = self.max_degree().max(rhs.max_degree());
        let min_degree = self.min_degree.min(rhs.min_degree);
        let request = HarmonicsRequest {
            max_degree: Some(max_degree),
            min_degree,
            gm: Some(self.gm),
            r: Some(self.r),
        };
        let mut out = self.get(&request);
        let other = rhs.get(&request);
        out.cnm += &other.cnm;
        out.snm += &other.snm;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{DEFAULT_GM, DEFAULT_R};

    fn filled(max_degree: usize) -> SphericalHarmonics {
        let size = max_degree + 1;
        let cnm = DMatrix::from_fn(size, size, |n, m| 1.0 + n as f64 + 0.1 * m as f64);
        let snm = DMatrix::from_fn(size, size, |n, m| -(1.0 + n as f64) - 0.01 * m as f64);
        SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, cnm, snm).unwrap()
    }

    #[test]
    fn construction_clears_invalid_entries() {
        let field = filled(3);
        assert_eq!(field.cnm()[(1, 2)], 0.0);
        assert_eq!(field.snm()[(2, 0)], 0.0);
        assert_eq!(field.cnm()[(3, 3)], 1.0 + 3.0 + 0.1 * 3.0);
    }

    #[test]
    fn truncation_keeps_only_requested_degrees() {
        let field = filled(6).get(&HarmonicsRequest::degrees(2, Some(2)));
        assert_eq!(field.max_degree(), 2);
        assert_eq!(field.min_degree(), 2);
        for n in 0..=2 {
            for m in 0..=n {
                let nonzero = field.cnm()[(n, m)] != 0.0;
                assert_eq!(nonzero, n == 2, "n={n} m={m}");
            }
        }
    }

    #[test]
    fn larger_max_degree_zero_pads() {
        let field = filled(2).get(&HarmonicsRequest::degrees(0, Some(5)));
        assert_eq!(field.max_degree(), 5);
        assert_eq!(field.cnm()[(2, 1)], 1.0 + 2.0 + 0.1);
        assert_eq!(field.cnm()[(4, 1)], 0.0);
    }

    #[test]
    fn rescaling_preserves_potential() {
        let field = filled(4).scaled(1e-9);
        let other = field.get(&HarmonicsRequest::degrees(0, None).with_reference(3.986e14, 6_371_000.0));
        assert!((other.cnm()[(3, 2)] - field.cnm()[(3, 2)] * (DEFAULT_GM / 3.986e14) * (DEFAULT_R / 6_371_000.0).powi(3)).abs() < 1e-20);

        let p = nalgebra::Vector3::new(4_000_000.0, 3_000_000.0, 3_500_000.0);
        let v1 = field.potential(&p);
        let v2 = other.potential(&p);
        assert!((v1 - v2).abs() < 1e-9 * v1.abs(), "{v1} vs {v2}");
    }

    #[test]
    fn vector_layout_is_degree_major() {
        let field = filled(2);
        let x = field.to_vector();
        assert_eq!(x.len(), 9);
        assert_eq!(x[coefficient_index(2, 0, true)], field.cnm()[(2, 0)]);
        assert_eq!(x[coefficient_index(2, 1, true)], field.cnm()[(2, 1)]);
        assert_eq!(x[coefficient_index(2, 1, false)], field.snm()[(2, 1)]);
        assert_eq!(x[coefficient_index(2, 2, false)], field.snm()[(2, 2)]);
        assert_eq!(coefficient_index(2, 2, false), 8);
    }

    #[test]
    fn addition_aligns_degrees() {
        let a = filled(2);
        let b = filled(3);
        let sum = &a + &b;
        assert_eq!(sum.max_degree(), 3);
        assert_eq!(sum.cnm()[(2, 1)], 2.0 * a.cnm()[(2, 1)]);
        assert_eq!(sum.cnm()[(3, 1)], b.cnm()[(3, 1)]);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let err = SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, DMatrix::zeros(3, 3), DMatrix::zeros(2, 2));
        assert!(err.is_err());
        assert!(SphericalHarmonics::zeros(-1.0, DEFAULT_R, 2).is_err());
    }
}
