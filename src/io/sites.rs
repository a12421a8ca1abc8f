//! Evaluation site lists (CSV).
//!
//! Columns: `id, x, y, z[, gravity]` with Earth-fixed coordinates in metres
//! and gravity in m/s². A missing gravity value defaults to `GM/r²`.

use std::path::Path;

use nalgebra::Vector3;

use crate::domain::Site;
use crate::error::{TideError, TideResult};
use crate::io::table::{open_csv, parse_field, require_column, required_field};
use crate::math::DEFAULT_GM;

pub fn read_sites(path: &Path) -> TideResult<Vec<Site>> {
    let (mut reader, header_map) = open_csv(path)?;
    let id_col = require_column(&header_map, "id", path)?;
    let x_col = require_column(&header_map, "x", path)?;
    let y_col = require_column(&header_map, "y", path)?;
    let z_col = require_column(&header_map, "z", path)?;
    let gravity_col = header_map.get("gravity").copied();

    let mut sites = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| TideError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let id = record.get(id_col).unwrap_or("").to_string();
        if id.is_empty() {
            return Err(TideError::file_format(path, Some(line), "missing `id` value"));
        }
        let position = Vector3::new(
            required_field(&record, x_col, "x", path, line)?,
            required_field(&record, y_col, "y", path, line)?,
            required_field(&record, z_col, "z", path, line)?,
        );
        let r = position.norm();
        if r <= 0.0 {
            return Err(TideError::file_format(path, Some(line), format!("site '{id}' is at the geocenter")));
        }
        let gravity = parse_field(&record, gravity_col, "gravity", path, line)?.unwrap_or(DEFAULT_GM / (r * r));
        if gravity <= 0.0 {
            return Err(TideError::file_format(path, Some(line), format!("site '{id}' has non-positive gravity")));
        }
        sites.push(Site { id, position, gravity });
    }

    if sites.is_empty() {
        return Err(TideError::file_format(path, None, "no sites found"));
    }
    Ok(sites)
}
