//! Elastic load response of surface sites.
//!
//! The operator maps a potential coefficient vector (layout of
//! [`SphericalHarmonics::to_vector`]) to stacked Earth-fixed displacement
//! vectors, three rows per site:
//!
//! ```text
//! u = Σn hn/g · Vn · e_r + ln/g · (∂Vn/∂θ · e_θ + 1/sinθ · ∂Vn/∂λ · e_λ)
//! ```
//!
//! Building it costs `O(sites · degree²)` and it is reused for every epoch,
//! so tides keep one operator image per site set in a [`DeformationCache`].
//!
//! [`SphericalHarmonics::to_vector`]: crate::harmonics::SphericalHarmonics::to_vector

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use nalgebra::{DMatrix, DVector, Vector3};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::harmonics::{SphericalHarmonics, coefficient_index};
use crate::math::LegendreTable;

/// Below this `sin θ` a site is treated as sitting on the rotation axis.
const POLE_EPS: f64 = 1e-12;

/// Load-response operator for a set of sites.
///
/// Degrees without a Love number contribute nothing.
pub fn deformation_matrix(
    positions: &[Vector3<f64>],
    gravity: &[f64],
    hn: &[f64],
    ln: &[f64],
    gm: f64,
    r: f64,
    max_degree: usize,
) -> DMatrix<f64> {
    let columns = (max_degree + 1) * (max_degree + 1);
    if hn.len() <= max_degree || ln.len() <= max_degree {
        warn!(
            max_degree,
            h_degrees = hn.len(),
            l_degrees = ln.len(),
            "Love numbers do not cover the field; missing degrees are treated as zero"
        );
    }

    let blocks: Vec<DMatrix<f64>> = positions
        .par_iter()
        .zip(gravity.par_iter())
        .map(|(position, &g)| site_block(position, g, hn, ln, gm, r, max_degree))
        .collect();

    let mut a = DMatrix::<f64>::zeros(3 * positions.len(), columns);
    for (k, block) in blocks.iter().enumerate() {
        a.view_mut((3 * k, 0), (3, columns)).copy_from(block);
    }
    a
}

fn site_block(
    position: &Vector3<f64>,
    gravity: f64,
    hn: &[f64],
    ln: &[f64],
    gm: f64,
    r: f64,
    max_degree: usize,
) -> DMatrix<f64> {
    let columns = (max_degree + 1) * (max_degree + 1);
    let mut block = DMatrix::<f64>::zeros(3, columns);

    let radius = position.norm();
    let rho = position.xy().norm();
    let (cos_theta, sin_theta) = (position.z / radius, rho / radius);
    let lambda = position.y.atan2(position.x);
    let (sin_lambda, cos_lambda) = lambda.sin_cos();

    let e_r = position / radius;
    let e_theta = Vector3::new(cos_theta * cos_lambda, cos_theta * sin_lambda, -sin_theta);
    let e_lambda = Vector3::new(-sin_lambda, cos_lambda, 0.0);

    let legendre = LegendreTable::new(max_degree, cos_theta, sin_theta);
    let ratio = r / radius;
    let mut scale = gm / (r * gravity) * ratio;

    for n in 0..=max_degree {
        let h = hn.get(n).copied().unwrap_or(0.0);
        let l = ln.get(n).copied().unwrap_or(0.0);
        if h != 0.0 || l != 0.0 {
            for m in 0..=n {
                let p = legendre.p(n, m);
                let dp = legendre.dp_dtheta(n, m);
                let east = if sin_theta > POLE_EPS { m as f64 * p / sin_theta } else { 0.0 };
                let (sin_ml, cos_ml) = (m as f64 * lambda).sin_cos();

                let u_c = (e_r * (h * p * cos_ml) + (e_theta * (dp * cos_ml) - e_lambda * (east * sin_ml)) * l) * scale;
                block.set_column(coefficient_index(n, m, true), &u_c);
                if m > 0 {
                    let u_s = (e_r * (h * p * sin_ml) + (e_theta * (dp * sin_ml) + e_lambda * (east * cos_ml)) * l) * scale;
                    block.set_column(coefficient_index(n, m, false), &u_s);
                }
            }
        }
        scale *= ratio;
    }
    block
}

/// Identity of an operator: every input compared bit for bit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OperatorKey {
    positions: Vec<[u64; 3]>,
    gravity: Vec<u64>,
    hn: Vec<u64>,
    ln: Vec<u64>,
}

impl OperatorKey {
    pub(crate) fn new(positions: &[Vector3<f64>], gravity: &[f64], hn: &[f64], ln: &[f64]) -> Self {
        let bits = |values: &[f64]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        Self {
            positions: positions
                .iter()
                .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                .collect(),
            gravity: bits(gravity),
            hn: bits(hn),
            ln: bits(ln),
        }
    }
}

/// Images of the real and imaginary coefficient sets under one operator.
#[derive(Debug)]
pub(crate) struct DisplacementBasis {
    pub(crate) real: DVector<f64>,
    pub(crate) imag: DVector<f64>,
}

impl DisplacementBasis {
    /// Displacement of site `k` for the given weights.
    #[inline]
    pub(crate) fn site(&self, k: usize, w_real: f64, w_imag: f64) -> Vector3<f64> {
        let real = self.real.fixed_rows::<3>(3 * k);
        let imag = self.imag.fixed_rows::<3>(3 * k);
        real * w_real + imag * w_imag
    }
}

/// Displacement bases built by a tide, one per distinct site set.
///
/// Concurrent readers share a basis through an `Arc`. Entries live as long
/// as the tide.
#[derive(Debug, Default)]
pub(crate) struct DeformationCache {
    bases: RwLock<HashMap<OperatorKey, Arc<DisplacementBasis>>>,
    builds: AtomicUsize,
}

impl DeformationCache {
    pub(crate) fn get_or_build(
        &self,
        positions: &[Vector3<f64>],
        gravity: &[f64],
        hn: &[f64],
        ln: &[f64],
        real: &SphericalHarmonics,
        imag: &SphericalHarmonics,
    ) -> Arc<DisplacementBasis> {
        debug_assert_eq!(real.max_degree(), imag.max_degree());
        let key = OperatorKey::new(positions, gravity, hn, ln);
        {
            let bases = self.bases.read().unwrap_or_else(|e| e.into_inner());
            if let Some(basis) = bases.get(&key) {
                return Arc::clone(basis);
            }
        }

        // Concurrent callers with the same sites wait here instead of building twice.
        let mut bases = self.bases.write().unwrap_or_else(|e| e.into_inner());
        if let Some(basis) = bases.get(&key) {
            return Arc::clone(basis);
        }

        let started = Instant::now();
        let a = deformation_matrix(positions, gravity, hn, ln, real.gm(), real.r(), real.max_degree());
        let basis = Arc::new(DisplacementBasis {
            real: &a * real.to_vector(),
            imag: &a * imag.to_vector(),
        });
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!(
            sites = positions.len(),
            max_degree = real.max_degree(),
            cached = bases.len() + 1,
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "built load response operator"
        );
        bases.insert(key, Arc::clone(&basis));
        basis
    }

    /// Number of operators built so far.
    pub(crate) fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
