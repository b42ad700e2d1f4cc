//! Error types for trajectory generation.

use std::fmt;

/// Errors produced while configuring or running a generation pass.
#[derive(Debug)]
pub enum TrajGenError {
    /// Invalid configuration (non-positive mass, zero time step, ...).
    Config(String),
    /// Start position coincides with (or is too close to) an attractor.
    ///
    /// `sample` is the dataset ordinal when the failure occurred inside a
    /// generation run, `None` for a direct integration call.
    DegenerateStart { sample: Option<usize> },
    /// An integration run hit its step ceiling without leaving the canvas.
    DidNotTerminate { sample: usize, steps: u64 },
    /// Failed to create output directories or write the parameter table.
    Io(std::io::Error),
    /// Failed to encode or save a rendered image.
    Image(image::ImageError),
}

impl fmt::Display for TrajGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrajGenError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            TrajGenError::DegenerateStart { sample: Some(i) } => {
                write!(f, "sample {}: start position coincides with an attractor", i)
            }
            TrajGenError::DegenerateStart { sample: None } => {
                write!(f, "start position coincides with an attractor")
            }
            TrajGenError::DidNotTerminate { sample, steps } => {
                write!(f, "sample {}: did not leave the canvas within {} steps", sample, steps)
            }
            TrajGenError::Io(e) => write!(f, "I/O error: {}", e),
            TrajGenError::Image(e) => write!(f, "image error: {}", e),
        }
    }
}

impl std::error::Error for TrajGenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrajGenError::Io(e) => Some(e),
            TrajGenError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<String> for TrajGenError {
    fn from(msg: String) -> Self {
        TrajGenError::Config(msg)
    }
}

impl From<&str> for TrajGenError {
    fn from(msg: &str) -> Self {
        TrajGenError::Config(msg.to_string())
    }
}

impl From<std::io::Error> for TrajGenError {
    fn from(e: std::io::Error) -> Self {
        TrajGenError::Io(e)
    }
}

impl From<image::ImageError> for TrajGenError {
    fn from(e: image::ImageError) -> Self {
        TrajGenError::Image(e)
    }
}
