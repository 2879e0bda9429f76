use std::time::Instant;

use crate::{
    convolve::{
        clamp::OutputClamp,
        sampler::ClampedSampler,
        separable::SeparableConvolver,
        strategy::{ExecutionStrategy, build_thread_pool},
    },
    foundation::{
        core::{Image, ScaleFactor, output_dimensions},
        error::{ResampleError, ResampleResult},
    },
    kernel::{
        catalog::InterpolationType,
        table::{Axis, AxisKernels},
    },
};

/// Immutable parameters of one resample: scale, kernel family and scheduling hints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResampleConfig {
    scale_factor: ScaleFactor,
    interpolation: InterpolationType,
    #[serde(default)]
    strategy: ExecutionStrategy,
    #[serde(default)]
    threads: Option<usize>,
}

impl ResampleConfig {
    /// Validates `scale_factor` (finite, `> 0`).
    pub fn new(scale_factor: f64, interpolation: InterpolationType) -> ResampleResult<Self> {
        Ok(Self {
            scale_factor: ScaleFactor::new(scale_factor)?,
            interpolation,
            strategy: ExecutionStrategy::default(),
            threads: None,
        })
    }

    pub fn with_strategy(self, strategy: ExecutionStrategy) -> Self {
        Self { strategy, ..self }
    }

    /// Worker threads for parallel strategies. `None` uses the global rayon pool.
    pub fn with_threads(self, threads: Option<usize>) -> ResampleResult<Self> {
        if threads == Some(0) {
            return Err(ResampleError::validation(
                "resample 'threads' must be >= 1 when set",
            ));
        }
        Ok(Self { threads, ..self })
    }

    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale_factor
    }

    pub fn interpolation(&self) -> InterpolationType {
        self.interpolation
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

/// Kernel tables and scheduling for one source size, reusable across images of that size.
#[derive(Debug)]
pub struct Resampler {
    config: ResampleConfig,
    source_size: (u32, u32),
    convolver: SeparableConvolver,
    pool: Option<rayon::ThreadPool>,
}

impl Resampler {
    #[tracing::instrument(
        skip(config),
        fields(kernel = %config.interpolation(), scale = config.scale_factor().get())
    )]
    pub fn new(
        source_width: u32,
        source_height: u32,
        config: &ResampleConfig,
    ) -> ResampleResult<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(ResampleError::validation(format!(
                "source dimensions must be >= 1 (got {source_width}x{source_height})"
            )));
        }
        let scale = config.scale_factor();
        let spec = config.interpolation().spec();
        let (out_w, out_h) = output_dimensions(source_width, source_height, scale)?;

        let kernels_x = AxisKernels::build(Axis::X, out_w, scale, &spec)?;
        let kernels_y = AxisKernels::build(Axis::Y, out_h, scale, &spec)?;
        let geometry = kernels_x.geometry();
        tracing::debug!(
            out_w,
            out_h,
            kernel_size = geometry.kernel_size,
            tap_count = geometry.tap_count,
            "built kernel tables"
        );

        let convolver = SeparableConvolver::new(kernels_x, kernels_y, config.strategy())?;
        let pool = match (config.strategy().parallelize(), config.threads()) {
            (true, Some(n)) => Some(build_thread_pool(Some(n))?),
            _ => None,
        };

        Ok(Self {
            config: *config,
            source_size: (source_width, source_height),
            convolver,
            pool,
        })
    }

    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    pub fn source_size(&self) -> (u32, u32) {
        self.source_size
    }

    pub fn output_size(&self) -> (u32, u32) {
        self.convolver.output_size()
    }

    pub fn convolver(&self) -> &SeparableConvolver {
        &self.convolver
    }

    /// Resample `src` into a newly allocated image.
    pub fn run(&self, src: &Image) -> ResampleResult<Image> {
        let (w, h) = self.output_size();
        let mut dst = Image::new(w, h)?;
        self.run_into(src, &mut dst)?;
        Ok(dst)
    }

    /// Resample `src` into `dst`, which must already have the output size.
    pub fn run_into(&self, src: &Image, dst: &mut Image) -> ResampleResult<()> {
        if (src.width(), src.height()) != self.source_size {
            return Err(ResampleError::validation(format!(
                "source is {}x{}, resampler was built for {}x{}",
                src.width(),
                src.height(),
                self.source_size.0,
                self.source_size.1
            )));
        }
        match &self.pool {
            Some(pool) => pool.install(|| self.execute(src, dst)),
            None => self.execute(src, dst),
        }
    }

    fn execute(&self, src: &Image, dst: &mut Image) -> ResampleResult<()> {
        let sampler = ClampedSampler::new(src);
        let t0 = Instant::now();
        let intermediate = self.convolver.horizontal_pass(&sampler);
        let t1 = Instant::now();
        self.convolver.vertical_pass_into(&intermediate, dst)?;
        OutputClamp::apply(dst);
        tracing::debug!(
            strategy = self.config.strategy().name(),
            horizontal_us = (t1 - t0).as_micros() as u64,
            vertical_us = t1.elapsed().as_micros() as u64,
            "resample passes done"
        );
        Ok(())
    }
}

/// One-shot resample of `src`.
#[tracing::instrument(skip(src, config), fields(width = src.width(), height = src.height()))]
pub fn resample(src: &Image, config: &ResampleConfig) -> ResampleResult<Image> {
    Resampler::new(src.width(), src.height(), config)?.run(src)
}

/// One-shot resample of `src` into a caller-provided destination.
#[tracing::instrument(skip(src, config, dst), fields(width = src.width(), height = src.height()))]
pub fn resample_into(
    src: &Image,
    config: &ResampleConfig,
    dst: &mut Image,
) -> ResampleResult<()> {
    Resampler::new(src.width(), src.height(), config)?.run_into(src, dst)
}

#[cfg(test)]
#[path = "../tests/unit/resample.rs"]
mod tests;
