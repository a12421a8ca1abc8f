//! Fully normalized associated Legendre functions.
//!
//! Geodetic normalization without the Condon–Shortley phase:
//!
//! ```text
//! P̄nm = sqrt((2 - δm0)(2n + 1)(n - m)! / (n + m)!) · Pnm
//! ```
//!
//! The functions are evaluated at `cos θ` (θ = colatitude) with the standard
//! sectoral / semi-sectoral seeds followed by the two-term column recursion,
//! which stays stable well beyond the degrees used for tidal fields.

use nalgebra::DMatrix;

/// `P̄nm(cos θ)` and `dP̄nm/dθ` for `0 <= m <= n <= max_degree`.
#[derive(Debug, Clone)]
pub struct LegendreTable {
    p: DMatrix<f64>,
    dp: DMatrix<f64>,
}

impl LegendreTable {
    /// Evaluate the table for colatitude θ given as `(cos θ, sin θ)`.
    pub fn new(max_degree: usize, cos_theta: f64, sin_theta: f64) -> Self {
        let p = legendre_values(max_degree, cos_theta, sin_theta);
        let dp = legendre_derivatives(&p);
        Self { p, dp }
    }

    pub fn max_degree(&self) -> usize {
        self.p.nrows() - 1
    }

    #[inline]
    pub fn p(&self, n: usize, m: usize) -> f64 {
        if m > n { 0.0 } else { self.p[(n, m)] }
    }

    /// Derivative with respect to colatitude.
    #[inline]
    pub fn dp_dtheta(&self, n: usize, m: usize) -> f64 {
        if m > n { 0.0 } else { self.dp[(n, m)] }
    }
}

fn legendre_values(max_degree: usize, t: f64, u: f64) -> DMatrix<f64> {
    let size = max_degree + 1;
    let mut p = DMatrix::<f64>::zeros(size, size);
    p[(0, 0)] = 1.0;

    // Sectoral seeds P̄mm.
    for m in 1..size {
        let factor = if m == 1 {
            3.0_f64.sqrt()
        } else {
            ((2 * m + 1) as f64 / (2 * m) as f64).sqrt()
        };
        p[(m, m)] = factor * u * p[(m - 1, m - 1)];
    }

    for m in 0..size {
        if m + 1 < size {
            p[(m + 1, m)] = ((2 * m + 3) as f64).sqrt() * t * p[(m, m)];
        }
        for n in (m + 2)..size {
            let nf = n as f64;
            let mf = m as f64;
            let a = ((2.0 * nf - 1.0) * (2.0 * nf + 1.0) / ((nf - mf) * (nf + mf))).sqrt();
            let b = ((2.0 * nf + 1.0) * (nf + mf - 1.0) * (nf - mf - 1.0)
                / ((nf - mf) * (nf + mf) * (2.0 * nf - 3.0)))
                .sqrt();
            p[(n, m)] = a * t * p[(n - 1, m)] - b * p[(n - 2, m)];
        }
    }
    p
}

fn legendre_derivatives(p: &DMatrix<f64>) -> DMatrix<f64> {
    let size = p.nrows();
    let at = |n: usize, m: usize| if m > n { 0.0 } else { p[(n, m)] };
    let mut dp = DMatrix::<f64>::zeros(size, size);

    for n in 1..size {
        let nf = n as f64;
        dp[(n, 0)] = -(nf * (nf + 1.0) / 2.0).sqrt() * at(n, 1);
        for m in 1..=n {
            let mf = m as f64;
            // m = 1 couples to the zonal term, which carries a different norm.
            let zonal = if m == 1 { 2.0_f64.sqrt() } else { 1.0 };
            let lower = ((nf + mf) * (nf - mf + 1.0)).sqrt() * zonal * at(n, m - 1);
            let upper = ((nf - mf) * (nf + mf + 1.0)).sqrt() * at(n, m + 1);
            dp[(n, m)] = 0.5 * (lower - upper);
        }
    }
    dp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(theta: f64, n: usize) -> LegendreTable {
        LegendreTable::new(n, theta.cos(), theta.sin())
    }

    #[test]
    fn low_degrees_match_closed_forms() {
        let theta: f64 = 0.7;
        let (t, u) = (theta.cos(), theta.sin());
        let tab = table(theta, 2);

        assert!((tab.p(0, 0) - 1.0).abs() < 1e-15);
        assert!((tab.p(1, 0) - 3.0_f64.sqrt() * t).abs() < 1e-14);
        assert!((tab.p(1, 1) - 3.0_f64.sqrt() * u).abs() < 1e-14);
        assert!((tab.p(2, 0) - 5.0_f64.sqrt() * (3.0 * t * t - 1.0) / 2.0).abs() < 1e-14);
        assert!((tab.p(2, 1) - 15.0_f64.sqrt() * t * u).abs() < 1e-14);
        assert!((tab.p(2, 2) - 15.0_f64.sqrt() / 2.0 * u * u).abs() < 1e-14);
        assert_eq!(tab.p(1, 2), 0.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let theta = 1.1;
        let h = 1e-6;
        let tab = table(theta, 12);
        let plus = table(theta + h, 12);
        let minus = table(theta - h, 12);

        for n in 0..=12 {
            for m in 0..=n {
                let numeric = (plus.p(n, m) - minus.p(n, m)) / (2.0 * h);
                let analytic = tab.dp_dtheta(n, m);
                assert!(
                    (numeric - analytic).abs() < 1e-6 * (1.0 + analytic.abs()),
                    "n={n} m={m}: numeric={numeric} analytic={analytic}"
                );
            }
        }
    }

    #[test]
    fn normalization_integrates_to_one() {
        // (1/2) ∫ P̄n0² sinθ dθ = 1 over [0, π]; midpoint rule is ample here.
        let steps = 20_000;
        let dtheta = std::f64::consts::PI / steps as f64;
        let mut sum = 0.0;
        for i in 0..steps {
            let theta = (i as f64 + 0.5) * dtheta;
            let tab = table(theta, 4);
            sum += tab.p(4, 0).powi(2) * theta.sin() * dtheta;
        }
        assert!((sum / 2.0 - 1.0).abs() < 1e-6, "got {sum}");
    }
}
