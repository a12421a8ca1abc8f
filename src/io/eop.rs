//! Tabulated Earth orientation series (CSV).
//!
//! Columns: `mjd, xp, yp[, dut1][, lod]` with the pole in arcseconds and
//! UT1-UTC / LOD in seconds. Missing optional columns read as zero.

use std::path::Path;

use tracing::debug;

use crate::earth::{EopRecord, TabulatedOrientation};
use crate::error::{TideError, TideResult};
use crate::io::table::{open_csv, parse_field, require_column, required_field};

pub fn read_eop_series(path: &Path) -> TideResult<TabulatedOrientation> {
    let (mut reader, header_map) = open_csv(path)?;
    let mjd_col = require_column(&header_map, "mjd", path)?;
    let xp_col = require_column(&header_map, "xp", path)?;
    let yp_col = require_column(&header_map, "yp", path)?;
    let dut1_col = header_map.get("dut1").copied();
    let lod_col = header_map.get("lod").copied();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| TideError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        records.push(EopRecord {
            mjd: required_field(&record, mjd_col, "mjd", path, line)?,
            xp_arcsec: required_field(&record, xp_col, "xp", path, line)?,
            yp_arcsec: required_field(&record, yp_col, "yp", path, line)?,
            dut1: parse_field(&record, dut1_col, "dut1", path, line)?.unwrap_or(0.0),
            lod: parse_field(&record, lod_col, "lod", path, line)?.unwrap_or(0.0),
        });
    }
    debug!(path = %path.display(), records = records.len(), "read EOP series");

    TabulatedOrientation::new(records)
        .map_err(|e| TideError::file_format(path, None, e.to_string()))
}
