//! Load Love number tables.
//!
//! Whitespace separated rows `n h l [k ...]`; extra columns are ignored and
//! degrees that are not listed read as zero.

use std::path::Path;

use crate::error::{TideError, TideResult};

/// Degree-indexed load Love numbers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoveNumbers {
    pub h: Vec<f64>,
    pub l: Vec<f64>,
}

pub fn read_love_numbers(path: &Path) -> TideResult<LoveNumbers> {
    let text = std::fs::read_to_string(path).map_err(|e| TideError::io(path, e))?;
    parse_love_numbers(&text, path)
}

pub fn parse_love_numbers(text: &str, path: &Path) -> TideResult<LoveNumbers> {
    let mut out = LoveNumbers::default();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(TideError::file_format(path, Some(line), "expected `n h l`"));
        }
        let n: usize = tokens[0]
            .parse()
            .map_err(|_| TideError::file_format(path, Some(line), format!("invalid degree '{}'", tokens[0])))?;
        let value = |token: &str| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| TideError::file_format(path, Some(line), format!("invalid Love number '{token}'")))
        };
        let (h, l) = (value(tokens[1])?, value(tokens[2])?);
        if out.h.len() <= n {
            out.h.resize(n + 1, 0.0);
            out.l.resize(n + 1, 0.0);
        }
        out.h[n] = h;
        out.l[n] = l;
    }
    if out.h.is_empty() {
        return Err(TideError::file_format(path, None, "no Love numbers found"));
    }
    Ok(out)
}
