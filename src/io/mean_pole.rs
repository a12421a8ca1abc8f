//! Mean pole model files (JSON).
//!
//! ```json
//! {
//!   "unit": "mas",
//!   "segments": [
//!     { "until": 2010.0, "epoch": 2000.0, "x": [55.974, 1.8243, 0.18413, 0.007024], "y": [346.346, 1.7896, -0.10729, -0.000908] },
//!     { "epoch": 2000.0, "x": [23.513, 7.6141], "y": [358.891, -0.6287] }
//!   ]
//! }
//! ```

use std::path::Path;

use crate::earth::MeanPoleModel;
use crate::error::{TideError, TideResult};

pub fn read_mean_pole(path: &Path) -> TideResult<MeanPoleModel> {
    let text = std::fs::read_to_string(path).map_err(|e| TideError::io(path, e))?;
    parse_mean_pole(&text, path)
}

pub fn parse_mean_pole(text: &str, path: &Path) -> TideResult<MeanPoleModel> {
    let model: MeanPoleModel = serde_json::from_str(text).map_err(|source| TideError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    model
        .check()
        .map_err(|message| TideError::file_format(path, None, message))?;
    Ok(model)
}
