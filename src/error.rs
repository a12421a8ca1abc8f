//! Error type shared by the library and the `poletide` binary.
//!
//! Construction errors are wrapped with [`TideError::context`] so the original
//! cause stays reachable through `std::error::Error::source`.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type TideResult<T> = Result<T, TideError>;

#[derive(Debug, Error)]
pub enum TideError {
    /// Missing or invalid configuration (paths, degree bounds, constants).
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A data file was readable but its content is inconsistent or corrupt.
    #[error("{}{}: {message}", .path.display(), .line.map(|l| format!(":{l}")).unwrap_or_default())]
    FileFormat {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}'", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in '{}'", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failure raised by an Earth-orientation provider.
    #[error("earth orientation unavailable at epoch {epoch:.3} s: {message}")]
    Orientation { epoch: f64, message: String },

    /// Caller-owned output buffer is smaller than the requested output.
    #[error("output buffer shape mismatch: {message}")]
    Shape { message: String },

    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<TideError>,
    },
}

impl TideError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn file_format(path: impl Into<PathBuf>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self::FileFormat {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Wrap `self` with a higher-level description, keeping it as the source.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error of a context chain.
    pub fn root_cause(&self) -> &TideError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> u8 {
        match self.root_cause() {
            Self::Configuration { .. } | Self::Io { .. } => 2,
            Self::FileFormat { .. } | Self::Json { .. } | Self::Csv { .. } => 3,
            Self::Orientation { .. } | Self::Shape { .. } => 4,
            Self::Context { .. } => 1,
        }
    }
}

/// Render an error together with all of its causes, one per line.
pub fn format_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        out.push_str(&format!("\n  caused by: {e}"));
        cause = e.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn context_preserves_cause_and_exit_code() {
        let err = TideError::file_format("coeffs.txt", Some(7), "bad row")
            .context("failed to load ocean pole coefficients")
            .context("failed to construct ocean pole tide");

        assert_eq!(err.exit_code(), 3);
        assert!(matches!(err.root_cause(), TideError::FileFormat { line: Some(7), .. }));

        let first = err.source().expect("context has a source");
        assert_eq!(first.to_string(), "failed to load ocean pole coefficients");

        let text = format_chain(&err);
        assert!(text.contains("coeffs.txt:7: bad row"), "{text}");
    }

    #[test]
    fn io_error_is_input_failure() {
        let err = TideError::io("missing.json", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.exit_code(), 2);
        assert!(err.source().is_some());
    }
}
