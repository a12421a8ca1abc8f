//! Shared helpers for the CSV inputs (EOP series, site lists).

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::error::{TideError, TideResult};

/// Open a headed CSV file with the reader settings used by every input.
pub(crate) fn open_csv(path: &Path) -> TideResult<(csv::Reader<File>, HashMap<String, usize>)> {
    let file = File::open(path).map_err(|e| TideError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| TideError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    Ok((reader, build_header_map(&headers)))
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

pub(crate) fn require_column(
    header_map: &HashMap<String, usize>,
    name: &str,
    path: &Path,
) -> TideResult<usize> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| TideError::file_format(path, Some(1), format!("missing required column `{name}`")))
}

/// Parse a numeric field; empty optional fields yield `None`.
pub(crate) fn parse_field(
    record: &StringRecord,
    column: Option<usize>,
    name: &str,
    path: &Path,
    line: usize,
) -> TideResult<Option<f64>> {
    let Some(raw) = column.and_then(|c| record.get(c)) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| TideError::file_format(path, Some(line), format!("invalid `{name}` value '{raw}'")))
}

pub(crate) fn required_field(
    record: &StringRecord,
    column: usize,
    name: &str,
    path: &Path,
    line: usize,
) -> TideResult<f64> {
    parse_field(record, Some(column), name, path, line)?
        .ok_or_else(|| TideError::file_format(path, Some(line), format!("missing `{name}` value")))
}
