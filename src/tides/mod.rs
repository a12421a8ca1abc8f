//! Tide contributors.
//!
//! Every contributor answers two questions: what potential it generates at an
//! epoch, and how far it moves a set of sites over a series of epochs. The
//! ocean pole tide is currently the only implementation; [`TideSet`] sums any
//! number of them behind the same interface.

pub mod deformation;
pub mod excitation;
pub mod ocean_pole;

pub use deformation::deformation_matrix;
pub use excitation::*;
pub use ocean_pole::*;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::domain::{Epoch, OceanPoleConfig};
use crate::earth::EarthOrientation;
use crate::error::TideResult;
use crate::harmonics::{HarmonicsRequest, SphericalHarmonics};
use crate::math::{DEFAULT_GM, DEFAULT_R};

/// A contributor to the time-variable gravity field and site deformation.
pub trait Tide: Send + Sync {
    fn name(&self) -> &str;

    /// Potential coefficients at `time`, shaped and scaled per `request`.
    fn spherical_harmonics(
        &self,
        time: Epoch,
        orientation: &dyn EarthOrientation,
        request: &HarmonicsRequest,
    ) -> TideResult<SphericalHarmonics>;

    /// Add the displacement of each site at each epoch into
    /// `displacement[site][epoch]` (Earth-fixed, m).
    ///
    /// `hn`/`ln` are load Love and Shida numbers indexed by degree. Existing
    /// buffer content is kept; an empty epoch or site list leaves it untouched.
    /// On error nothing has been added.
    #[allow(clippy::too_many_arguments)]
    fn deformation(
        &self,
        times: &[Epoch],
        positions: &[Vector3<f64>],
        orientation: &dyn EarthOrientation,
        gravity: &[f64],
        hn: &[f64],
        ln: &[f64],
        displacement: &mut [Vec<Vector3<f64>>],
    ) -> TideResult<()>;
}

/// Serializable selection of a tide contributor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TideConfig {
    OceanPole(OceanPoleConfig),
}

impl TideConfig {
    pub fn build(&self) -> TideResult<Box<dyn Tide>> {
        match self {
            TideConfig::OceanPole(config) => Ok(Box::new(OceanPoleTide::new(config)?)),
        }
    }
}

/// Sum of several tide contributors.
///
/// Members deform into a scratch buffer that is added to the caller's only
/// after every member has succeeded.
#[derive(Default)]
pub struct TideSet {
    tides: Vec<Box<dyn Tide>>,
}

impl TideSet {
    pub fn new(tides: Vec<Box<dyn Tide>>) -> Self {
        Self { tides }
    }

    /// Build every configured contributor, in order.
    pub fn from_configs(configs: &[TideConfig]) -> TideResult<Self> {
        let tides = configs.iter().map(TideConfig::build).collect::<TideResult<Vec<_>>>()?;
        Ok(Self::new(tides))
    }

    pub fn push(&mut self, tide: Box<dyn Tide>) {
        self.tides.push(tide);
    }

    pub fn len(&self) -> usize {
        self.tides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tides.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tides.iter().map(|t| t.name()).collect()
    }
}

impl std::fmt::Debug for TideSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TideSet").field("tides", &self.names()).finish()
    }
}

impl Tide for TideSet {
    fn name(&self) -> &str {
        "tideSet"
    }

    fn spherical_harmonics(
        &self,
        time: Epoch,
        orientation: &dyn EarthOrientation,
        request: &HarmonicsRequest,
    ) -> TideResult<SphericalHarmonics> {
        let mut members = self.tides.iter();
        let Some(first) = members.next() else {
            return SphericalHarmonics::zeros(
                request.gm.unwrap_or(DEFAULT_GM),
                request.r.unwrap_or(DEFAULT_R),
                request.max_degree.unwrap_or(request.min_degree),
            );
        };
        let mut sum = first.spherical_harmonics(time, orientation, request)?;
        for tide in members {
            sum = &sum + &tide.spherical_harmonics(time, orientation, request)?;
        }
        Ok(sum)
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
        ocean_pole::check_deformation_shapes(times.len(), positions.len(), gravity.len(), displacement)?;

        let mut sum = vec![vec![Vector3::zeros(); times.len()]; positions.len()];
        for tide in &self.tides {
            tide.deformation(times, positions, orientation, gravity, hn, ln, &mut sum)?;
        }
        for (series, partial) in displacement.iter_mut().zip(&sum) {
            for (slot, d) in series.iter_mut().zip(partial) {
                *slot += d;
            }
        }
        Ok(())
    }
}
