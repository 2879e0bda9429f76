//! Separable variable-kernel image resampling.
//!
//! An [`Image`] is resized by an arbitrary positive [`ScaleFactor`] with a box, linear or cubic
//! kernel chosen through [`InterpolationType`].
//!
//! # Pipeline overview
//!
//! 1. **Kernel tables**: for every output coordinate on each axis, build a normalized
//!    [`KernelTable`]. When downscaling, the kernel is widened by `1 / scale` to act as a lowpass
//!    filter.
//! 2. **Horizontal pass**: filter every source row the vertical taps can reach, reading the source
//!    through a clamp-to-edge [`ClampedSampler`], into an [`Intermediate`] buffer.
//! 3. **Vertical pass**: filter the intermediate buffer along y.
//! 4. **Output clamp**: restrict samples to `[0, 1]` ([`OutputClamp`]).
//!
//! [`ExecutionStrategy`] only changes scheduling (column lanes, rayon row parallelism); every
//! strategy produces bit-identical output.
//!
//! Decoding and encoding go through the `image` crate via [`decode_image`] / [`encode_image`].
//! Nothing in this crate touches the filesystem.
#![forbid(unsafe_code)]

mod codec;
mod convolve;
mod foundation;
mod kernel;
mod resample;

pub use codec::{decode_image, encode_image};
pub use convolve::clamp::OutputClamp;
pub use convolve::sampler::ClampedSampler;
pub use convolve::separable::{Intermediate, SeparableConvolver};
pub use convolve::strategy::ExecutionStrategy;
pub use foundation::core::{CHANNELS, Image, ScaleFactor, output_dimensions};
pub use foundation::error::{ResampleError, ResampleResult};
pub use image::ImageFormat;
pub use kernel::catalog::{InterpolationType, KernelSpec};
pub use kernel::table::{Axis, AxisKernels, KernelGeometry, KernelTable};
pub use resample::{ResampleConfig, Resampler, resample, resample_into};
