//! Reconstruction kernels and the per-coordinate tap tables derived from them.

pub(crate) mod catalog;
pub(crate) mod table;
