use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures raised by the quality analysis core.
///
/// Stages return `anyhow::Result`; callers that need the kind recover it with
/// `err.downcast_ref::<QcError>()`.
#[derive(Debug, Error)]
pub enum QcError {
    /// Input file content does not satisfy the expected shape.
    #[error("{}: {reason}", path.display())]
    Validation { path: PathBuf, reason: String },

    #[error(
        "the number of timeseries files ({timeseries}) does not equal the number of confounds files ({confounds})"
    )]
    ArityMismatch { timeseries: usize, confounds: usize },

    #[error("no timeseries and confounds files provided")]
    EmptyInput,

    /// Any other failure while analyzing one scan.
    #[error("failed to analyze {}", path.display())]
    ScanAnalysis {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Inconsistent dimensions across scans or coordinates.
    #[error("shape mismatch: {0}")]
    Shape(String),
}

impl QcError {
    pub fn validation(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn scan(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::ScanAnalysis {
            path: path.into(),
            source: source.into(),
        }
    }

    /// File the error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Validation { path, .. } | Self::ScanAnalysis { path, .. } => Some(path),
            _ => None,
        }
    }
}
