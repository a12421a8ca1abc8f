//! Export evaluation results.
//!
//! Excitations and displacements go to CSV so they load directly into
//! spreadsheets or plotting scripts; coefficient fields go to JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;
use serde::Serialize;

use crate::domain::{Epoch, Site};
use crate::error::{TideError, TideResult};
use crate::harmonics::SphericalHarmonics;
use crate::tides::ExcitationSample;

/// One synthesized field in a potential export.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRecord<'a> {
    pub epoch: Epoch,
    pub time: String,
    pub field: &'a SphericalHarmonics,
}

fn create(path: &Path) -> TideResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| TideError::io(path, e).context(format!("failed to create export '{}'", path.display())))
}

/// Write `m1, m2` and the admittance weights per epoch.
pub fn write_excitation_csv(path: &Path, samples: &[ExcitationSample]) -> TideResult<()> {
    let mut out = create(path)?;
    let write_err = |e| TideError::io(path, e);

    writeln!(out, "time,mjd,m1_arcsec,m2_arcsec,w_real,w_imag").map_err(write_err)?;
    for s in samples {
        writeln!(
            out,
            "{},{:.8},{:.9},{:.9},{:.12e},{:.12e}",
            s.epoch, s.epoch.mjd(), s.excitation.m1, s.excitation.m2, s.weights.real, s.weights.imag
        )
        .map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

/// Write one row per site and epoch with Earth-fixed and local components (m).
pub fn write_displacement_csv(
    path: &Path,
    sites: &[Site],
    times: &[Epoch],
    displacement: &[Vec<Vector3<f64>>],
) -> TideResult<()> {
    let mut out = create(path)?;
    let write_err = |e| TideError::io(path, e);

    writeln!(out, "site,time,mjd,dx,dy,dz,east,north,up").map_err(write_err)?;
    for (site, series) in sites.iter().zip(displacement) {
        for (epoch, d) in times.iter().zip(series) {
            let enu = to_local(&site.position, d);
            writeln!(
                out,
                "{},{},{:.8},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e},{:.6e}",
                site.id,
                epoch,
                epoch.mjd(),
                d.x,
                d.y,
                d.z,
                enu.x,
                enu.y,
                enu.z
            )
            .map_err(write_err)?;
        }
    }
    out.flush().map_err(write_err)
}

/// Write a list of synthesized fields as pretty JSON.
pub fn write_fields_json(path: &Path, records: &[FieldRecord<'_>]) -> TideResult<()> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, records).map_err(|source| TideError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(|e| TideError::io(path, e))
}

/// Rotate an Earth-fixed vector into east, north and up at `position`.
///
/// The local frame is spherical (geocentric latitude). On the rotation axis
/// east is taken along +y.
pub fn to_local(position: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    let r = position.norm();
    if r == 0.0 {
        return *v;
    }
    let up = position / r;
    let rho = position.xy().norm();
    let east = if rho > 0.0 {
        Vector3::new(-position.y / rho, position.x / rho, 0.0)
    } else {
        Vector3::y()
    };
    let north = up.cross(&east);
    Vector3::new(v.dot(&east), v.dot(&north), v.dot(&up))
}
