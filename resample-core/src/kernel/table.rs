use std::{fmt, ops::Range};

use crate::{
    foundation::{
        core::ScaleFactor,
        error::{ResampleError, ResampleResult},
    },
    kernel::catalog::KernelSpec,
};

/// Upper bound on taps per output coordinate.
const MAX_TAP_COUNT: usize = 1 << 22;

/// Image axis a kernel table is built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Columns (horizontal pass).
    X,
    /// Rows (vertical pass).
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Kernel footprint shared by every output coordinate of one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelGeometry {
    /// `min(scale, 1)`.
    pub kernel_scaling: f64,
    /// Widened half-width in source pixels: `half_width / kernel_scaling`.
    pub kernel_size: f64,
    /// `floor(2 * kernel_size) + 1`.
    pub tap_count: usize,
}

impl KernelGeometry {
    pub fn new(scale: ScaleFactor, spec: &KernelSpec) -> ResampleResult<Self> {
        let kernel_scaling = scale.kernel_scaling();
        let kernel_size = spec.support_half_width() / kernel_scaling;
        let span = (2.0 * kernel_size).floor();
        if !span.is_finite() || span >= MAX_TAP_COUNT as f64 {
            return Err(ResampleError::validation(format!(
                "{} kernel at scale {} needs more than {MAX_TAP_COUNT} taps",
                spec.name(),
                scale.get()
            )));
        }
        Ok(Self {
            kernel_scaling,
            kernel_size,
            tap_count: span as usize + 1,
        })
    }
}

/// Normalized taps for one output coordinate: tap `k` reads source index `begin + k`.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelTable {
    begin: i64,
    weights: Vec<f32>,
}

impl KernelTable {
    /// Build the table for `output_coord` on `axis`.
    pub fn build(
        axis: Axis,
        output_coord: u32,
        scale: ScaleFactor,
        spec: &KernelSpec,
    ) -> ResampleResult<Self> {
        let geometry = KernelGeometry::new(scale, spec)?;
        Self::build_with(axis, output_coord, scale, spec, &geometry)
    }

    fn build_with(
        axis: Axis,
        output_coord: u32,
        scale: ScaleFactor,
        spec: &KernelSpec,
        geometry: &KernelGeometry,
    ) -> ResampleResult<Self> {
        // Pixel centers sit at half-integer output coordinates.
        let source = (f64::from(output_coord) + 0.5) / scale.get();
        let begin = (source - geometry.kernel_size + 0.5).floor();

        let raw = (0..geometry.tap_count)
            .map(|k| spec.weight((k as f64 + begin - source) * geometry.kernel_scaling))
            .collect::<Vec<f64>>();
        let sum: f64 = raw.iter().sum();
        if sum == 0.0 || !sum.is_finite() {
            return Err(ResampleError::degenerate_kernel(axis, output_coord));
        }

        Ok(Self {
            begin: begin as i64,
            weights: raw.iter().map(|&w| (w / sum) as f32).collect(),
        })
    }

    /// First source index read by this table (may be negative).
    pub fn begin(&self) -> i64 {
        self.begin
    }

    /// One past the last source index read by this table.
    pub fn end(&self) -> i64 {
        self.begin + self.weights.len() as i64
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn tap_count(&self) -> usize {
        self.weights.len()
    }

    /// `(source index, weight)` pairs in tap order.
    pub fn taps(&self) -> impl Iterator<Item = (i64, f32)> + '_ {
        (self.begin..).zip(self.weights.iter().copied())
    }
}

/// Every [`KernelTable`] of one axis, indexed by output coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisKernels {
    axis: Axis,
    geometry: KernelGeometry,
    tables: Vec<KernelTable>,
}

impl AxisKernels {
    pub fn build(
        axis: Axis,
        output_len: u32,
        scale: ScaleFactor,
        spec: &KernelSpec,
    ) -> ResampleResult<Self> {
        let geometry = KernelGeometry::new(scale, spec)?;
        let tables = (0..output_len)
            .map(|o| KernelTable::build_with(axis, o, scale, spec, &geometry))
            .collect::<ResampleResult<Vec<_>>>()?;
        Ok(Self {
            axis,
            geometry,
            tables,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn geometry(&self) -> KernelGeometry {
        self.geometry
    }

    pub fn tap_count(&self) -> usize {
        self.geometry.tap_count
    }

    /// Number of output coordinates.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, output_coord: usize) -> &KernelTable {
        &self.tables[output_coord]
    }

    pub fn tables(&self) -> &[KernelTable] {
        &self.tables
    }

    /// Half-open range of source indices read by any table on this axis.
    pub fn source_window(&self) -> Range<i64> {
        let start = self.tables.iter().map(KernelTable::begin).min().unwrap_or(0);
        let end = self.tables.iter().map(KernelTable::end).max().unwrap_or(0);
        start..end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/table.rs"]
mod tests;
