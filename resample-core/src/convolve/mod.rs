//! Two-pass separable convolution over a clamp-to-edge source.

pub(crate) mod clamp;
pub(crate) mod sampler;
pub(crate) mod separable;
pub(crate) mod strategy;
