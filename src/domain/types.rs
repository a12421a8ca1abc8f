//! Shared domain types.
//!
//! These stay plain data so they can be built from CLI flags, JSON files or
//! directly by embedding code.

use std::path::{Path, PathBuf};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::domain::Epoch;
use crate::error::{TideError, TideResult};

/// Environment variable substituted for `{dataDir}` in configured paths.
pub const DATA_DIR_ENV: &str = "POLE_TIDE_DATA_DIR";

/// Earth orientation parameters at one epoch.
///
/// Angles are in radians, `delta_ut1` and `lod` in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EarthOrientationParameters {
    pub xp: f64,
    pub yp: f64,
    /// TIO locator s'.
    pub sp: f64,
    pub delta_ut1: f64,
    pub lod: f64,
    /// Celestial pole offsets X, Y and the CIO locator s.
    pub x: f64,
    pub y: f64,
    pub s: f64,
}

/// A ground station or evaluation point in the Earth-fixed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: String,
    /// Earth-fixed Cartesian position (m).
    pub position: Vector3<f64>,
    /// Local gravity (m/s²).
    pub gravity: f64,
}

/// Configuration of the ocean pole tide.
///
/// Field names follow the configuration keys of the data files distributed
/// with the coefficient sets (`inputfileOceanPole`, `gammaReal`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OceanPoleConfig {
    /// Coefficient file with the real and imaginary admittance fields.
    #[serde(rename = "inputfileOceanPole", default)]
    pub inputfile_ocean_pole: Option<PathBuf>,
    #[serde(default = "default_min_degree")]
    pub min_degree: usize,
    /// `None` keeps the file's native maximum degree.
    #[serde(default)]
    pub max_degree: Option<usize>,
    #[serde(default = "default_gamma_real")]
    pub gamma_real: f64,
    #[serde(default = "default_gamma_imaginary")]
    pub gamma_imaginary: f64,
    /// Secular (mean) pole model.
    #[serde(rename = "inputfileMeanPole", default)]
    pub inputfile_mean_pole: Option<PathBuf>,
    /// The result is multiplied by this factor; `-1` subtracts the field.
    #[serde(default = "default_factor")]
    pub factor: f64,
}

fn default_min_degree() -> usize {
    2
}

fn default_gamma_real() -> f64 {
    0.6870
}

fn default_gamma_imaginary() -> f64 {
    0.0036
}

fn default_factor() -> f64 {
    1.0
}

impl OceanPoleConfig {
    /// Configuration with both required paths and all defaults.
    pub fn new(ocean_pole: impl Into<PathBuf>, mean_pole: impl Into<PathBuf>) -> Self {
        Self {
            inputfile_ocean_pole: Some(ocean_pole.into()),
            min_degree: default_min_degree(),
            max_degree: None,
            gamma_real: default_gamma_real(),
            gamma_imaginary: default_gamma_imaginary(),
            inputfile_mean_pole: Some(mean_pole.into()),
            factor: default_factor(),
        }
    }

    /// Load a JSON configuration file.
    pub fn from_json_file(path: &Path) -> TideResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TideError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| TideError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check required keys and value ranges.
    pub fn validate(&self) -> TideResult<()> {
        if self.inputfile_ocean_pole.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
            return Err(TideError::configuration("inputfileOceanPole must be set"));
        }
        if self.inputfile_mean_pole.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
            return Err(TideError::configuration("inputfileMeanPole must be set"));
        }
        if let Some(max) = self.max_degree {
            if max < self.min_degree {
                return Err(TideError::configuration(format!(
                    "maxDegree ({max}) is smaller than minDegree ({})",
                    self.min_degree
                )));
            }
        }
        for (name, value) in [
            ("gammaReal", self.gamma_real),
            ("gammaImaginary", self.gamma_imaginary),
            ("factor", self.factor),
        ] {
            if !value.is_finite() {
                return Err(TideError::configuration(format!("{name} must be finite, got {value}")));
            }
        }
        Ok(())
    }

    /// Coefficient file path with `{dataDir}` expanded.
    pub fn ocean_pole_path(&self) -> TideResult<PathBuf> {
        let path = self
            .inputfile_ocean_pole
            .as_deref()
            .ok_or_else(|| TideError::configuration("inputfileOceanPole must be set"))?;
        expand_data_dir(path)
    }

    /// Mean pole file path with `{dataDir}` expanded.
    pub fn mean_pole_path(&self) -> TideResult<PathBuf> {
        let path = self
            .inputfile_mean_pole
            .as_deref()
            .ok_or_else(|| TideError::configuration("inputfileMeanPole must be set"))?;
        expand_data_dir(path)
    }
}

/// Replace a `{dataDir}` placeholder with [`DATA_DIR_ENV`].
///
/// A `.env` file in the working directory is honored.
pub fn expand_data_dir(path: &Path) -> TideResult<PathBuf> {
    let text = path.to_string_lossy();
    if !text.contains("{dataDir}") {
        return Ok(path.to_path_buf());
    }
    dotenvy::dotenv().ok();
    let dir = std::env::var(DATA_DIR_ENV).map_err(|_| {
        TideError::configuration(format!(
            "path '{text}' uses {{dataDir}} but {DATA_DIR_ENV} is not set (environment or .env)"
        ))
    })?;
    Ok(PathBuf::from(text.replace("{dataDir}", &dir)))
}

/// Which output the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Excitation,
    Potential,
    Deformation,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub kind: RunKind,
    pub tide: OceanPoleConfig,
    pub eop_path: PathBuf,

    pub start: Epoch,
    pub end: Epoch,
    pub step_seconds: f64,

    /// Output truncation / rescaling for potential runs.
    pub max_degree: Option<usize>,
    pub min_degree: usize,
    pub gm: Option<f64>,
    pub radius: Option<f64>,

    pub sites_path: Option<PathBuf>,
    pub love_path: Option<PathBuf>,

    pub preview_rows: usize,
    pub export: Option<PathBuf>,
}
