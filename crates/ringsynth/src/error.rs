//! Error type shared by every generation stage.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which side of a parameter range was violated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Value must be greater than or equal to the limit.
    AtLeast(f64),
    /// Value must be lower than or equal to the limit.
    AtMost(f64),
    /// Value must be strictly lower than the limit.
    Below(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(v) => write!(f, "greater than or equal to {}", v),
            Self::AtMost(v) => write!(f, "lower than or equal to {}", v),
            Self::Below(v) => write!(f, "lower than {}", v),
        }
    }
}

/// Errors raised while sampling, rendering, pruning or persisting grids.
#[derive(Debug, Error)]
pub enum SynthError {
    /// An argument violates its declared range.
    #[error("{name} should be {bound}. The given value was {value}")]
    InvalidParameter {
        /// Argument name as it appears in the call.
        name: &'static str,
        /// Violated bound.
        bound: Bound,
        /// Value that was supplied.
        value: f64,
    },

    /// A grid handed to the pruner contains a value other than 0 or 1.
    #[error("grid must contain only 0/1 values, found {value} at ({row}, {col})")]
    InvalidGrid { row: usize, col: usize, value: u8 },

    /// No integer radius lies in the half-open range `[rmin, rmax)`.
    #[error("no integer radius in [{rmin}, {rmax})")]
    EmptyRadiusRange { rmin: f64, rmax: f64 },

    /// The rejection loop hit its configured retry ceiling.
    #[error("center sampling gave up after {attempts} rejected draws")]
    SamplingExhausted { attempts: usize },

    /// Two grids of different sizes were combined.
    #[error("grid size mismatch: {left}x{left} vs {right}x{right}")]
    GridSizeMismatch { left: usize, right: usize },

    /// A generator configuration is unusable as a whole.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A dataset file could not be parsed.
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SynthError>;
