//! Ocean pole tide.
//!
//! The pole tide is generated by the centrifugal effect of polar motion on
//! the oceans. Its potential is a static complex admittance field weighted by
//! the current excitation pair:
//!
//! ```text
//! Cnm = wReal · Cnm_real + wImag · Cnm_imag      (same for Snm)
//! ```
//!
//! with the weights from [`admittance_weights`]. Site displacements reuse the
//! same weights on the load response of the two static fields.

use std::path::Path;

use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::domain::{Epoch, OceanPoleConfig};
use crate::earth::{EarthOrientation, MeanPoleModel};
use crate::error::{TideError, TideResult};
use crate::harmonics::{HarmonicsRequest, SphericalHarmonics};
use crate::io::{OceanPoleCoefficients, read_mean_pole, read_ocean_pole_coefficients};
use crate::tides::deformation::DeformationCache;
use crate::tides::excitation::{
    AdmittanceWeights, Excitation, ExcitationSample, admittance_weights, pole_excitation,
};
use crate::tides::Tide;

/// Real and imaginary admittance fields after truncation and scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientSet {
    real: SphericalHarmonics,
    imag: SphericalHarmonics,
}

impl CoefficientSet {
    /// Read a coefficient file and prepare it for evaluation.
    pub fn load(path: &Path, min_degree: usize, max_degree: Option<usize>, factor: f64) -> TideResult<Self> {
        let coefficients = read_ocean_pole_coefficients(path)?;
        Self::prepare(coefficients, path, min_degree, max_degree, factor)
    }

    /// Truncate both fields to `[min_degree, max_degree]` and multiply by `factor`.
    ///
    /// Fields with different reference constants are a format error, reported
    /// against the source name `<coefficients>`.
    pub fn from_coefficients(
        coefficients: OceanPoleCoefficients,
        min_degree: usize,
        max_degree: Option<usize>,
        factor: f64,
    ) -> TideResult<Self> {
        Self::prepare(coefficients, Path::new("<coefficients>"), min_degree, max_degree, factor)
    }

    fn prepare(
        coefficients: OceanPoleCoefficients,
        source: &Path,
        min_degree: usize,
        max_degree: Option<usize>,
        factor: f64,
    ) -> TideResult<Self> {
        let OceanPoleCoefficients { real, imag } = coefficients;
        if real.gm() != imag.gm() || real.r() != imag.r() {
            return Err(TideError::file_format(source, None, format!(
                "real (GM={}, R={}) and imaginary (GM={}, R={}) fields use different reference constants",
                real.gm(),
                real.r(),
                imag.gm(),
                imag.r()
            )));
        }
        if let Some(max) = max_degree {
            if max < min_degree {
                return Err(TideError::configuration(format!(
                    "maxDegree ({max}) is smaller than minDegree ({min_degree})"
                )));
            }
        }
        let native = real.max_degree().max(imag.max_degree());
        if min_degree > native {
            warn!(min_degree, native, "minDegree exceeds the coefficient file; the tide is identically zero");
        }

        let request = HarmonicsRequest::degrees(min_degree, Some(max_degree.unwrap_or(native)));
        Ok(Self {
            real: real.get(&request).scaled(factor),
            imag: imag.get(&request).scaled(factor),
        })
    }

    pub fn real(&self) -> &SphericalHarmonics {
        &self.real
    }

    pub fn imag(&self) -> &SphericalHarmonics {
        &self.imag
    }
}

/// Ocean pole tide model.
///
/// Immutable after construction apart from the internally synchronized
/// deformation cache, so one instance can serve many evaluator threads.
#[derive(Debug)]
pub struct OceanPoleTide {
    coefficients: CoefficientSet,
    mean_pole: MeanPoleModel,
    gamma_real: f64,
    gamma_imag: f64,
    cache: DeformationCache,
}

impl OceanPoleTide {
    /// Load coefficient and mean pole files named by `config`.
    pub fn new(config: &OceanPoleConfig) -> TideResult<Self> {
        Self::load(config).map_err(|e| e.context("failed to construct ocean pole tide"))
    }

    fn load(config: &OceanPoleConfig) -> TideResult<Self> {
        config.validate()?;

        let ocean_pole_path = config.ocean_pole_path()?;
        let coefficients = CoefficientSet::load(
            &ocean_pole_path,
            config.min_degree,
            config.max_degree,
            config.factor,
        )
        .map_err(|e| e.context(format!("failed to read ocean pole coefficients '{}'", ocean_pole_path.display())))?;

        let mean_pole_path = config.mean_pole_path()?;
        let mean_pole = read_mean_pole(&mean_pole_path)
            .map_err(|e| e.context(format!("failed to read mean pole model '{}'", mean_pole_path.display())))?;

        info!(
            coefficients = %ocean_pole_path.display(),
            mean_pole = %mean_pole_path.display(),
            min_degree = coefficients.real.min_degree(),
            max_degree = coefficients.real.max_degree(),
            factor = config.factor,
            "loaded ocean pole tide"
        );
        Ok(Self::from_parts(coefficients, mean_pole, config.gamma_real, config.gamma_imaginary))
    }

    /// Assemble a tide from already prepared components.
    pub fn from_parts(coefficients: CoefficientSet, mean_pole: MeanPoleModel, gamma_real: f64, gamma_imag: f64) -> Self {
        Self {
            coefficients,
            mean_pole,
            gamma_real,
            gamma_imag,
            cache: DeformationCache::default(),
        }
    }

    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    pub fn mean_pole(&self) -> &MeanPoleModel {
        &self.mean_pole
    }

    /// Excitation pair `(m1, m2)` in arcseconds at `time`.
    pub fn excitation(&self, time: Epoch, orientation: &dyn EarthOrientation) -> TideResult<Excitation> {
        let eop = orientation.earth_orientation_parameter(time)?;
        Ok(pole_excitation(&eop, self.mean_pole.compute(time)))
    }

    pub fn weights(&self, excitation: Excitation) -> AdmittanceWeights {
        admittance_weights(excitation, self.gamma_real, self.gamma_imag)
    }

    /// Excitation and weights for each epoch, in input order.
    pub fn excitation_series(
        &self,
        times: &[Epoch],
        orientation: &dyn EarthOrientation,
    ) -> TideResult<Vec<ExcitationSample>> {
        times
            .par_iter()
            .map(|&epoch| {
                let excitation = self.excitation(epoch, orientation)?;
                Ok(ExcitationSample {
                    epoch,
                    excitation,
                    weights: self.weights(excitation),
                })
            })
            .collect()
    }

    /// Number of load-response operators built by this instance.
    pub fn operator_builds(&self) -> usize {
        self.cache.builds()
    }
}

impl Tide for OceanPoleTide {
    fn name(&self) -> &str {
        "oceanPole"
    }

    fn spherical_harmonics(
        &self,
        time: Epoch,
        orientation: &dyn EarthOrientation,
        request: &HarmonicsRequest,
    ) -> TideResult<SphericalHarmonics> {
        let w = self.weights(self.excitation(time, orientation)?);
        let real = &self.coefficients.real;
        let imag = &self.coefficients.imag;

        let cnm = real.cnm() * w.real + imag.cnm() * w.imag;
        let snm = real.snm() * w.real + imag.snm() * w.imag;
        let field = SphericalHarmonics::with_min_degree(real.gm(), real.r(), real.min_degree(), cnm, snm)?;
        Ok(field.get(request))
    }

    fn deformation(
        &self,
        times: &[Epoch],
        positions: &[Vector3<f64>],
        orientation: &dyn EarthOrientation,
        gravity: &[f64],
        hn: &[f64],
        ln: &[f64],
        displacement: &mut [Vec<Vector3<f64>>],
    ) -> TideResult<()> {
        if times.is_empty() || positions.is_empty() {
            return Ok(());
        }
        check_deformation_shapes(times.len(), positions.len(), gravity.len(), displacement)?;

        let basis = self.cache.get_or_build(
            positions,
            gravity,
            hn,
            ln,
            &self.coefficients.real,
            &self.coefficients.imag,
        );

        let samples = self.excitation_series(times, orientation)?;
        debug!(epochs = times.len(), sites = positions.len(), "accumulating ocean pole tide deformation");

        displacement
            .par_iter_mut()
            .take(positions.len())
            .enumerate()
            .for_each(|(k, series)| {
                for (slot, sample) in series.iter_mut().zip(&samples) {
                    *slot += basis.site(k, sample.weights.real, sample.weights.imag);
                }
            });
        Ok(())
    }
}

/// Validate the caller's buffers before anything is written.
pub(crate) fn check_deformation_shapes(
    epochs: usize,
    sites: usize,
    gravity: usize,
    displacement: &[Vec<Vector3<f64>>],
) -> TideResult<()> {
    if gravity != sites {
        return Err(TideError::shape(format!("{gravity} gravity values for {sites} sites")));
    }
    if displacement.len() < sites {
        return Err(TideError::shape(format!(
            "displacement buffer holds {} sites, {sites} requested",
            displacement.len()
        )));
    }
    if let Some((k, series)) = displacement.iter().take(sites).enumerate().find(|(_, s)| s.len() < epochs) {
        return Err(TideError::shape(format!(
            "displacement buffer of site {k} holds {} epochs, {epochs} requested",
            series.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EarthOrientationParameters;
    use crate::earth::ConstantOrientation;
    use crate::math::{ARCSEC2RAD, DEFAULT_GM, DEFAULT_R};
    use nalgebra::DMatrix;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const GAMMA_R: f64 = 0.6870;
    const GAMMA_I: f64 = 0.0036;

    fn random_coefficients(max_degree: usize, seed: u64) -> OceanPoleCoefficients {
        let mut rng = StdRng::seed_from_u64(seed);
        let size = max_degree + 1;
        let mut field = || {
            let cnm = DMatrix::from_fn(size, size, |_, _| rng.gen_range(-1e-9..1e-9));
            let snm = DMatrix::from_fn(size, size, |_, _| rng.gen_range(-1e-9..1e-9));
            (cnm, snm)
        };
        let (c_real, s_real) = field();
        let (c_imag, s_imag) = field();
        OceanPoleCoefficients {
            real: SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, c_real, s_real).unwrap(),
            imag: SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, c_imag, s_imag).unwrap(),
        }
    }

    fn tide(factor: f64, min_degree: usize, max_degree: Option<usize>, mean_pole: MeanPoleModel) -> OceanPoleTide {
        let set = CoefficientSet::from_coefficients(random_coefficients(6, 7), min_degree, max_degree, factor).unwrap();
        OceanPoleTide::from_parts(set, mean_pole, GAMMA_R, GAMMA_I)
    }

    fn sites() -> Vec<Vector3<f64>> {
        [(47.0_f64, 11.0_f64), (-12.0, 130.0), (65.0, -20.0)]
            .iter()
            .map(|&(lat, lon)| {
                let (lat, lon) = (lat.to_radians(), lon.to_radians());
                Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()) * 6_371_000.0
            })
            .collect()
    }

    fn love() -> (Vec<f64>, Vec<f64>) {
        (
            vec![0.0, -0.29, -1.001, -1.061, -1.054, -1.058, -1.084],
            vec![0.0, 0.113, 0.030, 0.059, 0.010, -0.024, -0.043],
        )
    }

    fn epochs() -> Vec<Epoch> {
        (0..4).map(|i| Epoch::from_mjd(58_849.0 + i as f64)).collect()
    }

    fn run_deformation(tide: &OceanPoleTide, orientation: &dyn EarthOrientation) -> Vec<Vec<Vector3<f64>>> {
        let positions = sites();
        let times = epochs();
        let (hn, ln) = love();
        let gravity = vec![9.81; positions.len()];
        let mut disp = vec![vec![Vector3::zeros(); times.len()]; positions.len()];
        tide.deformation(&times, &positions, orientation, &gravity, &hn, &ln, &mut disp).unwrap();
        disp
    }

    #[test]
    fn potential_is_deterministic() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.35 * ARCSEC2RAD);
        let t = Epoch::from_mjd(59_000.0);
        let a = tide.spherical_harmonics(t, &eop, &HarmonicsRequest::default()).unwrap();
        let b = tide.spherical_harmonics(t, &eop, &HarmonicsRequest::default()).unwrap();
        assert_eq!(a, b);
        for (x, y) in a.cnm().iter().zip(b.cnm().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn end_to_end_unit_conversion() {
        let tide = tide(1.0, 2, None, MeanPoleModel::constant(0.0, 0.0));
        let xp = 1e-6;
        let eop = ConstantOrientation::polar_motion(xp, 0.0);
        let t = Epoch::from_mjd(58_849.0);

        let e = tide.excitation(t, &eop).unwrap();
        assert!((e.m1 - 0.2063).abs() < 1e-4);
        assert_eq!(e.m2, 0.0);
        assert!((e.m1 * ARCSEC2RAD - xp).abs() <= 1e-6 * 1e-14);

        let field = tide.spherical_harmonics(t, &eop, &HarmonicsRequest::default()).unwrap();
        let set = tide.coefficients();
        let w_real = e.m1 * GAMMA_R * ARCSEC2RAD;
        let w_imag = -e.m1 * GAMMA_I * ARCSEC2RAD;
        for n in 2..=6 {
            for m in 0..=n {
                let (a, b) = (w_real * set.real().cnm()[(n, m)], w_imag * set.imag().cnm()[(n, m)]);
                assert!((field.cnm()[(n, m)] - (a + b)).abs() <= 1e-14 * (a.abs() + b.abs()));
                let (a, b) = (w_real * set.real().snm()[(n, m)], w_imag * set.imag().snm()[(n, m)]);
                assert!((field.snm()[(n, m)] - (a + b)).abs() <= 1e-14 * (a.abs() + b.abs()));
            }
        }
        assert_eq!(field.gm(), DEFAULT_GM);
        assert_eq!(field.r(), DEFAULT_R);
    }

    #[test]
    fn negative_factor_negates_field() {
        let eop = ConstantOrientation::polar_motion(0.12 * ARCSEC2RAD, 0.4 * ARCSEC2RAD);
        let t = Epoch::from_mjd(59_500.0);
        let plus = tide(1.0, 2, Some(5), MeanPoleModel::iers2010())
            .spherical_harmonics(t, &eop, &HarmonicsRequest::default())
            .unwrap();
        let minus = tide(-1.0, 2, Some(5), MeanPoleModel::iers2010())
            .spherical_harmonics(t, &eop, &HarmonicsRequest::default())
            .unwrap();
        for (a, b) in plus.cnm().iter().zip(minus.cnm().iter()) {
            assert_eq!(*a, -*b);
        }
        for (a, b) in plus.snm().iter().zip(minus.snm().iter()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn degree_two_only() {
        let tide = tide(1.0, 2, Some(2), MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let field = tide
            .spherical_harmonics(Epoch::from_mjd(59_000.0), &eop, &HarmonicsRequest::default())
            .unwrap();
        assert_eq!(field.max_degree(), 2);
        for n in 0..=2 {
            for m in 0..=n {
                assert_eq!(field.cnm()[(n, m)] != 0.0, n == 2, "C{n}{m}");
            }
        }
    }

    #[test]
    fn request_rescales_output() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let t = Epoch::from_mjd(59_000.0);
        let native = tide.spherical_harmonics(t, &eop, &HarmonicsRequest::default()).unwrap();
        let request = HarmonicsRequest::degrees(3, Some(4)).with_reference(3.986e14, 6_371_000.0);
        let out = tide.spherical_harmonics(t, &eop, &request).unwrap();
        assert_eq!(out.max_degree(), 4);
        assert_eq!(out.cnm()[(2, 0)], 0.0);
        let scale = DEFAULT_GM / 3.986e14 * (DEFAULT_R / 6_371_000.0_f64).powi(4);
        assert!((out.cnm()[(4, 3)] - native.cnm()[(4, 3)] * scale).abs() < 1e-12 * native.cnm()[(4, 3)].abs());
    }

    #[test]
    fn deformation_is_linear_in_pole_offset() {
        let tide = tide(1.0, 2, None, MeanPoleModel::constant(0.0, 0.0));
        let base = ConstantOrientation::polar_motion(0.08 * ARCSEC2RAD, -0.21 * ARCSEC2RAD);
        let k = 2.5;
        let scaled = ConstantOrientation::polar_motion(k * base.eop.xp, k * base.eop.yp);

        let a = run_deformation(&tide, &base);
        let b = run_deformation(&tide, &scaled);
        for (sa, sb) in a.iter().zip(&b) {
            for (va, vb) in sa.iter().zip(sb) {
                assert!((vb - va * k).norm() <= 1e-12 * va.norm().max(1e-30), "{va} vs {vb}");
            }
        }
        assert!(a[0][0].norm() > 0.0);
    }

    #[test]
    fn deformation_adds_into_existing_content() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let fresh = run_deformation(&tide, &eop);

        let positions = sites();
        let times = epochs();
        let (hn, ln) = love();
        let gravity = vec![9.81; positions.len()];
        let offset = Vector3::new(1.0, -2.0, 3.0);
        let mut disp = vec![vec![offset; times.len()]; positions.len()];
        tide.deformation(&times, &positions, &eop, &gravity, &hn, &ln, &mut disp).unwrap();

        for (sa, sb) in fresh.iter().zip(&disp) {
            for (va, vb) in sa.iter().zip(sb) {
                assert!((vb - offset - va).norm() < 1e-12);
            }
        }
        // Same site set: the operator is reused.
        assert_eq!(tide.operator_builds(), 1);
    }

    #[test]
    fn alternating_site_sets_build_each_operator_once() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let times = epochs();
        let (hn, ln) = love();
        let all = sites();
        let subsets = [&all[..2], &all[2..]];

        let mut results = Vec::new();
        for positions in subsets.iter().chain(subsets.iter()) {
            let gravity = vec![9.81; positions.len()];
            let mut disp = vec![vec![Vector3::zeros(); times.len()]; positions.len()];
            tide.deformation(&times, positions, &eop, &gravity, &hn, &ln, &mut disp).unwrap();
            results.push(disp);
        }

        assert_eq!(tide.operator_builds(), 2);
        assert_eq!(results[0], results[2]);
        assert_eq!(results[1], results[3]);
    }

    #[test]
    fn deformation_matches_potential_radially() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let positions = sites();
        let times = vec![Epoch::from_mjd(59_000.0)];
        let gravity = vec![9.81; positions.len()];
        // Degree-independent h so the radial displacement is h/g times the full potential.
        let hn = vec![0.6; 7];
        let ln = vec![0.0; 7];
        let mut disp = vec![vec![Vector3::zeros(); 1]; positions.len()];
        tide.deformation(&times, &positions, &eop, &gravity, &hn, &ln, &mut disp).unwrap();

        let field = tide.spherical_harmonics(times[0], &eop, &HarmonicsRequest::default()).unwrap();
        for (k, p) in positions.iter().enumerate() {
            let expected = 0.6 / 9.81 * field.potential(p);
            let radial = disp[k][0].dot(&(p / p.norm()));
            assert!((radial - expected).abs() < 1e-10 * expected.abs(), "{radial} vs {expected}");
        }
    }

    #[test]
    fn empty_inputs_leave_buffer_untouched() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let (hn, ln) = love();
        let marker = Vector3::new(7.0, 8.0, 9.0);

        let mut disp = vec![vec![marker; 2]; 2];
        tide.deformation(&[], &sites(), &eop, &[9.8; 3], &hn, &ln, &mut disp).unwrap();
        tide.deformation(&epochs(), &[], &eop, &[], &hn, &ln, &mut disp).unwrap();
        assert!(disp.iter().flatten().all(|v| *v == marker));
        assert_eq!(tide.operator_builds(), 0);
    }

    #[test]
    fn undersized_buffer_is_rejected_before_writing() {
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let eop = ConstantOrientation::polar_motion(0.1 * ARCSEC2RAD, 0.3 * ARCSEC2RAD);
        let (hn, ln) = love();
        let positions = sites();
        let mut disp = vec![vec![Vector3::zeros(); 4]; 2];
        let err = tide
            .deformation(&epochs(), &positions, &eop, &[9.8; 3], &hn, &ln, &mut disp)
            .unwrap_err();
        assert!(matches!(err, TideError::Shape { .. }), "{err}");
        assert!(disp.iter().flatten().all(|v| *v == Vector3::zeros()));
    }

    #[test]
    fn orientation_failures_propagate() {
        struct Failing;
        impl EarthOrientation for Failing {
            fn earth_orientation_parameter(&self, time: Epoch) -> TideResult<EarthOrientationParameters> {
                Err(TideError::Orientation { epoch: time.seconds(), message: "no data".into() })
            }
        }
        let tide = tide(1.0, 2, None, MeanPoleModel::iers2018());
        let err = tide
            .spherical_harmonics(Epoch::J2000, &Failing, &HarmonicsRequest::default())
            .unwrap_err();
        assert!(matches!(err, TideError::Orientation { .. }));
    }

    #[test]
    fn mismatched_reference_constants_fail_construction() {
        let mut coeffs = random_coefficients(3, 1);
        coeffs.imag = coeffs.imag.get(&HarmonicsRequest::default().with_reference(3.9e14, DEFAULT_R));
        let err = CoefficientSet::from_coefficients(coeffs, 2, None, 1.0).unwrap_err();
        assert!(matches!(err, TideError::FileFormat { line: None, .. }), "{err}");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn construction_from_files_chains_errors() {
        let dir = std::env::temp_dir().join(format!("poletide_ctor_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let coeff_path = dir.join("pole.txt");
        std::fs::write(&coeff_path, "GM 3.986004415e14\nR 6378136.3\n2 1 -2.0e-9 1.0e-9 3.0e-10 -1.0e-10\n").unwrap();
        let mean_path = dir.join("mean.json");
        std::fs::write(&mean_path, r#"{ "segments": [ { "epoch": 2000.0, "x": [55.0, 1.677], "y": [320.5, 3.460] } ] }"#).unwrap();

        let tide = OceanPoleTide::new(&OceanPoleConfig::new(&coeff_path, &mean_path)).unwrap();
        assert_eq!(tide.coefficients().real().max_degree(), 2);
        assert_eq!(tide.mean_pole(), &MeanPoleModel::iers2018());

        let err = OceanPoleTide::new(&OceanPoleConfig::new(dir.join("missing.txt"), &mean_path)).unwrap_err();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err.root_cause(), TideError::Io { .. }));
        assert!(err.to_string().contains("failed to construct ocean pole tide"));
    }
}
