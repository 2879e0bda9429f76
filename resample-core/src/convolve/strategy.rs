use rayon::prelude::*;

use crate::foundation::error::{ResampleError, ResampleResult};

/// Output pixels computed together by the vectorized row kernels.
pub(crate) const LANES: usize = 4;

/// How the two passes are scheduled. Every strategy produces bit-identical output.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// One row at a time, one pixel at a time.
    #[default]
    Serial,
    /// Columns in groups of [`LANES`] pixels.
    Vectorized,
    /// Rows spread over a rayon pool.
    Parallel,
    /// Both of the above.
    VectorizedParallel,
}

impl ExecutionStrategy {
    /// Every strategy, ordered by index.
    pub const ALL: [Self; 4] = [
        Self::Serial,
        Self::Vectorized,
        Self::Parallel,
        Self::VectorizedParallel,
    ];

    /// Map a CLI schedule index (`0..=3`) to a strategy.
    pub fn from_index(index: u8) -> ResampleResult<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                ResampleError::validation(format!("invalid schedule {index} (expected 0..=3)"))
            })
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Serial => 0,
            Self::Vectorized => 1,
            Self::Parallel => 2,
            Self::VectorizedParallel => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Serial => "default",
            Self::Vectorized => "vectorized",
            Self::Parallel => "parallel",
            Self::VectorizedParallel => "vectorized+parallel",
        }
    }

    pub fn vectorize(self) -> bool {
        matches!(self, Self::Vectorized | Self::VectorizedParallel)
    }

    pub fn parallelize(self) -> bool {
        matches!(self, Self::Parallel | Self::VectorizedParallel)
    }
}

/// Run `f(row_index, row)` over consecutive `row_len`-sample rows of `out`.
pub(crate) fn for_each_row<F>(out: &mut [f32], row_len: usize, parallel: bool, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    if parallel {
        out.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    } else {
        out.chunks_mut(row_len)
            .enumerate()
            .for_each(|(i, row)| f(i, row));
    }
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> ResampleResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ResampleError::validation(
            "resample 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ResampleError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/convolve/strategy.rs"]
mod tests;
