//! Shared evaluation pipeline used by every subcommand.
//!
//! load tide -> load orientation series -> build epoch grid -> evaluate
//!
//! The CLI handlers then focus on presentation and export.

use nalgebra::Vector3;
use rayon::prelude::*;
use tracing::info;

use crate::domain::{Epoch, RunConfig, RunKind, Site};
use crate::earth::EarthOrientation;
use crate::error::{TideError, TideResult};
use crate::harmonics::{HarmonicsRequest, SphericalHarmonics};
use crate::io::{read_eop_series, read_love_numbers, read_sites};
use crate::tides::{ExcitationSample, OceanPoleTide, Tide};

/// Result of one run, by kind.
#[derive(Debug, Clone)]
pub enum RunResult {
    Excitation(Vec<ExcitationSample>),
    Potential(Vec<SphericalHarmonics>),
    Deformation {
        sites: Vec<Site>,
        displacement: Vec<Vec<Vector3<f64>>>,
    },
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub times: Vec<Epoch>,
    pub result: RunResult,
}

/// Load every input named by `config` and evaluate.
pub fn run(config: &RunConfig) -> TideResult<RunOutput> {
    let tide = OceanPoleTide::new(&config.tide)?;
    let orientation = read_eop_series(&config.eop_path)
        .map_err(|e| e.context(format!("failed to load earth orientation '{}'", config.eop_path.display())))?;
    let (first, last) = orientation.span();
    info!(records = orientation.len(), first_mjd = first, last_mjd = last, "loaded earth orientation");

    run_with(config, &tide, &orientation)
}

/// Evaluate with an already constructed tide and orientation provider.
pub fn run_with(config: &RunConfig, tide: &OceanPoleTide, orientation: &dyn EarthOrientation) -> TideResult<RunOutput> {
    let times = Epoch::series(config.start, config.end, config.step_seconds)?;
    info!(epochs = times.len(), start = %config.start, end = %config.end, "evaluating {:?}", config.kind);

    let result = match config.kind {
        RunKind::Excitation => RunResult::Excitation(tide.excitation_series(&times, orientation)?),
        RunKind::Potential => {
            let request = HarmonicsRequest {
                max_degree: config.max_degree,
                min_degree: config.min_degree,
                gm: config.gm,
                r: config.radius,
            };
            let fields = times
                .par_iter()
                .map(|&t| tide.spherical_harmonics(t, orientation, &request))
                .collect::<TideResult<Vec<_>>>()?;
            RunResult::Potential(fields)
        }
        RunKind::Deformation => {
            let sites_path = config
                .sites_path
                .as_deref()
                .ok_or_else(|| TideError::configuration("deformation requires a site list"))?;
            let love_path = config
                .love_path
                .as_deref()
                .ok_or_else(|| TideError::configuration("deformation requires load Love numbers"))?;
            let sites = read_sites(sites_path)?;
            let love = read_love_numbers(love_path)?;

            let positions: Vec<_> = sites.iter().map(|s| s.position).collect();
            let gravity: Vec<_> = sites.iter().map(|s| s.gravity).collect();
            let mut displacement = vec![vec![Vector3::zeros(); times.len()]; sites.len()];
            tide.deformation(&times, &positions, orientation, &gravity, &love.h, &love.l, &mut displacement)?;
            RunResult::Deformation { sites, displacement }
        }
    };

    Ok(RunOutput { times, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OceanPoleConfig;
    use crate::earth::{ConstantOrientation, MeanPoleModel};
    use crate::io::OceanPoleCoefficients;
    use crate::math::{ARCSEC2RAD, DEFAULT_GM, DEFAULT_R};
    use crate::tides::CoefficientSet;
    use nalgebra::DMatrix;
    use std::path::PathBuf;

    fn tide() -> OceanPoleTide {
        let mut cnm = DMatrix::zeros(3, 3);
        let mut snm = DMatrix::zeros(3, 3);
        cnm[(2, 1)] = -2.2e-9;
        snm[(2, 1)] = 1.1e-9;
        let real = SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, cnm.clone(), snm.clone()).unwrap();
        let imag = SphericalHarmonics::new(DEFAULT_GM, DEFAULT_R, cnm * 0.05, snm * 0.05).unwrap();
        let set = CoefficientSet::from_coefficients(OceanPoleCoefficients { real, imag }, 2, None, 1.0).unwrap();
        OceanPoleTide::from_parts(set, MeanPoleModel::iers2018(), 0.6870, 0.0036)
    }

    fn config(kind: RunKind) -> RunConfig {
        RunConfig {
            kind,
            tide: OceanPoleConfig::new("unused.txt", "unused.json"),
            eop_path: PathBuf::from("unused.csv"),
            start: Epoch::from_mjd(59_000.0),
            end: Epoch::from_mjd(59_002.0),
            step_seconds: 86_400.0,
            max_degree: Some(4),
            min_degree: 0,
            gm: None,
            radius: None,
            sites_path: None,
            love_path: None,
            preview_rows: 5,
            export: None,
        }
    }

    #[test]
    fn potential_run_produces_one_field_per_epoch() {
        let eop = ConstantOrientation::polar_motion(0.15 * ARCSEC2RAD, 0.4 * ARCSEC2RAD);
        let out = run_with(&config(RunKind::Potential), &tide(), &eop).unwrap();
        assert_eq!(out.times.len(), 3);
        let RunResult::Potential(fields) = out.result else {
            panic!("expected potential output");
        };
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.max_degree() == 4));
        assert!(fields[0].cnm()[(2, 1)] != 0.0);
    }

    #[test]
    fn excitation_run_keeps_epoch_order() {
        let eop = ConstantOrientation::polar_motion(0.15 * ARCSEC2RAD, 0.4 * ARCSEC2RAD);
        let out = run_with(&config(RunKind::Excitation), &tide(), &eop).unwrap();
        let RunResult::Excitation(samples) = out.result else {
            panic!("expected excitation output");
        };
        for (sample, t) in samples.iter().zip(&out.times) {
            assert_eq!(sample.epoch, *t);
        }
    }

    #[test]
    fn deformation_without_sites_is_configuration_error() {
        let eop = ConstantOrientation::polar_motion(0.0, 0.0);
        let err = run_with(&config(RunKind::Deformation), &tide(), &eop).unwrap_err();
        assert!(matches!(err, TideError::Configuration { .. }), "{err}");
    }
}
