use std::path::PathBuf;
use thiserror::Error;

// Errors raised while reading AeoLiS result files, deriving series or rendering
#[derive(Debug, Error)]
pub enum VizError {
    #[error("failed to open result file {path:?}: {source}")]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    #[error("variable not found in result file: {0}")]
    MissingVariable(String),

    #[error("time series needs at least {required} samples, got {found}")]
    InsufficientSamples { required: usize, found: usize },

    #[error("shape mismatch for {name}: {detail}")]
    ShapeMismatch { name: String, detail: String },

    #[error("index {index} out of range for axis of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("video encoder `{program}` is not available: {source}")]
    EncoderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("video encoder failed: {0}")]
    EncoderFailed(String),

    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, VizError>;

impl VizError {
    pub(crate) fn shape(name: &str, detail: impl Into<String>) -> Self {
        VizError::ShapeMismatch {
            name: name.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn render(err: impl std::fmt::Display) -> Self {
        VizError::Render(err.to_string())
    }
}

/// Resolve an index that may count from the end (`-1` is the last element).
pub fn resolve_index(index: isize, len: usize) -> Result<usize> {
    let resolved = if index < 0 {
        len as isize + index
    } else {
        index
    };

    if resolved < 0 || resolved as usize >= len {
        return Err(VizError::IndexOutOfRange { index, len });
    }
    Ok(resolved as usize)
}
