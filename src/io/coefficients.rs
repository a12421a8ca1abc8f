//! Ocean pole tide coefficient files.
//!
//! Plain text, one coefficient pair per line:
//!
//! ```text
//! # comment
//! GM  3.986004415e14
//! R   6378136.3
//! # n  m   C_real  S_real  C_imag  S_imag
//! 2  1   -2.1e-9  4.0e-10  1.2e-10  -3.3e-11
//! ```
//!
//! `GM`/`R` apply to both fields. `GM_real`, `R_real`, `GM_imag`, `R_imag`
//! override them per field; both fields must end up with the same constants.

use std::collections::HashSet;
use std::path::Path;

use nalgebra::DMatrix;

use crate::error::{TideError, TideResult};
use crate::harmonics::SphericalHarmonics;

/// Real and imaginary admittance fields as read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanPoleCoefficients {
    pub real: SphericalHarmonics,
    pub imag: SphericalHarmonics,
}

#[derive(Debug, Default)]
struct Header {
    gm: Option<f64>,
    r: Option<f64>,
    gm_real: Option<f64>,
    r_real: Option<f64>,
    gm_imag: Option<f64>,
    r_imag: Option<f64>,
}

struct Row {
    n: usize,
    m: usize,
    values: [f64; 4],
}

/// Read and parse a coefficient file.
pub fn read_ocean_pole_coefficients(path: &Path) -> TideResult<OceanPoleCoefficients> {
    let text = std::fs::read_to_string(path).map_err(|e| TideError::io(path, e))?;
    parse_ocean_pole_coefficients(&text, path)
}

/// Parse coefficient file content; `path` is only used in error messages.
pub fn parse_ocean_pole_coefficients(text: &str, path: &Path) -> TideResult<OceanPoleCoefficients> {
    let mut header = Header::default();
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();
        let err = |message: String| TideError::file_format(path, Some(line), message);

        if tokens[0].starts_with(|c: char| c.is_ascii_alphabetic()) {
            if tokens.len() != 2 {
                return Err(err(format!("expected `<key> <value>`, found '{content}'")));
            }
            let value = parse_number(tokens[1]).ok_or_else(|| err(format!("invalid value '{}'", tokens[1])))?;
            let slot = match tokens[0].to_ascii_lowercase().as_str() {
                "gm" => &mut header.gm,
                "r" => &mut header.r,
                "gm_real" => &mut header.gm_real,
                "r_real" => &mut header.r_real,
                "gm_imag" => &mut header.gm_imag,
                "r_imag" => &mut header.r_imag,
                other => return Err(err(format!("unknown header key '{other}'"))),
            };
            if !(value.is_finite() && value > 0.0) {
                return Err(err(format!("{} must be positive, got {value}", tokens[0])));
            }
            *slot = Some(value);
            continue;
        }

        if tokens.len() != 6 {
            return Err(err(format!("expected 6 columns (n m C_real S_real C_imag S_imag), found {}", tokens.len())));
        }
        let n: usize = tokens[0].parse().map_err(|_| err(format!("invalid degree '{}'", tokens[0])))?;
        let m: usize = tokens[1].parse().map_err(|_| err(format!("invalid order '{}'", tokens[1])))?;
        if m > n {
            return Err(err(format!("order {m} exceeds degree {n}")));
        }
        if !seen.insert((n, m)) {
            return Err(err(format!("duplicate coefficient n={n} m={m}")));
        }
        let mut values = [0.0; 4];
        for (slot, token) in values.iter_mut().zip(&tokens[2..]) {
            *slot = parse_number(token)
                .filter(|v| v.is_finite())
                .ok_or_else(|| err(format!("invalid coefficient '{token}'")))?;
        }
        rows.push(Row { n, m, values });
    }

    let Some(max_degree) = rows.iter().map(|r| r.n).max() else {
        return Err(TideError::file_format(path, None, "no coefficients found"));
    };

    let missing = |what: &str| TideError::file_format(path, None, format!("missing {what} header"));
    let gm_real = header.gm_real.or(header.gm).ok_or_else(|| missing("GM"))?;
    let gm_imag = header.gm_imag.or(header.gm).ok_or_else(|| missing("GM"))?;
    let r_real = header.r_real.or(header.r).ok_or_else(|| missing("R"))?;
    let r_imag = header.r_imag.or(header.r).ok_or_else(|| missing("R"))?;
    if gm_real != gm_imag || r_real != r_imag {
        return Err(TideError::file_format(
            path,
            None,
            format!(
                "inconsistent reference constants: real GM={gm_real} R={r_real}, imaginary GM={gm_imag} R={r_imag}"
            ),
        ));
    }

    let size = max_degree + 1;
    let mut c_real = DMatrix::<f64>::zeros(size, size);
    let mut s_real = DMatrix::<f64>::zeros(size, size);
    let mut c_imag = DMatrix::<f64>::zeros(size, size);
    let mut s_imag = DMatrix::<f64>::zeros(size, size);
    for row in &rows {
        let (n, m) = (row.n, row.m);
        c_real[(n, m)] = row.values[0];
        s_real[(n, m)] = row.values[1];
        c_imag[(n, m)] = row.values[2];
        s_imag[(n, m)] = row.values[3];
    }

    let build = |c, s| {
        SphericalHarmonics::new(gm_real, r_real, c, s)
            .map_err(|e| TideError::file_format(path, None, e.to_string()))
    };
    Ok(OceanPoleCoefficients {
        real: build(c_real, s_real)?,
        imag: build(c_imag, s_imag)?,
    })
}

/// Accepts Fortran-style `D` exponents as found in older coefficient tables.
fn parse_number(token: &str) -> Option<f64> {
    token.replace(['D', 'd'], "e").parse().ok()
}
