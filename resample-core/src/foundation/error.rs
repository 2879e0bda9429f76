use crate::kernel::table::Axis;

/// Convenience result type used across the resampler.
pub type ResampleResult<T> = Result<T, ResampleError>;

/// Top-level error taxonomy used by resampling APIs.
///
/// Every variant is terminal for the call that produced it: resampling is pure and
/// deterministic, so repeating a failed call reproduces the same failure.
#[derive(thiserror::Error, Debug)]
pub enum ResampleError {
    /// Invalid caller-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// A kernel table whose raw weights sum to zero (or to a non-finite value).
    #[error("degenerate kernel: {axis} axis, output coordinate {coord} has a zero weight sum")]
    DegenerateKernel {
        /// Axis the table was built for.
        axis: Axis,
        /// Output coordinate on that axis.
        coord: u32,
    },

    /// Image decode/encode failures from the codec bridge.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResampleError {
    /// Build a [`ResampleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ResampleError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`ResampleError::DegenerateKernel`] value.
    pub fn degenerate_kernel(axis: Axis, coord: u32) -> Self {
        Self::DegenerateKernel { axis, coord }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
