//! Error types shared by the engine, the mapper and the control plumbing.

use std::time::Duration;

use thiserror::Error;

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors surfaced on the control side.
///
/// The audio callback never returns these: anything that could go wrong
/// there is rejected up front or absorbed by the degeneracy guard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// A parameter was rejected before it could reach the audio thread.
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A value drifted to NaN or infinity.
    #[error("numeric degeneracy in '{name}'")]
    NumericDegeneracy {
        /// Which value degenerated.
        name: &'static str,
    },

    /// The control device never reported connected.
    #[error("control device did not connect within {waited:?}")]
    ConnectionFailed {
        /// How long we waited before giving up.
        waited: Duration,
    },

    /// The parameter queue to the audio thread is full.
    #[error("parameter queue is full")]
    QueueFull,

    /// A partition or target table failed validation.
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

impl SynthError {
    pub(crate) fn invalid(name: &'static str, value: impl Into<f64>) -> Self {
        SynthError::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}
