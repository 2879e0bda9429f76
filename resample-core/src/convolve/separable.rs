use std::ops::Range;

use crate::{
    convolve::{
        sampler::{ClampedRow, ClampedSampler},
        strategy::{ExecutionStrategy, LANES, for_each_row},
    },
    foundation::{
        core::{CHANNELS, Image},
        error::{ResampleError, ResampleResult},
    },
    kernel::table::{Axis, AxisKernels, KernelTable},
};

/// Output of the horizontal pass.
///
/// Rows are indexed by *source* row over the window the vertical taps reach, which extends
/// past `[0, source height)` by up to the kernel size on either side. Rows outside the source
/// hold the horizontally filtered edge row.
#[derive(Clone, Debug, PartialEq)]
pub struct Intermediate {
    width: u32,
    rows: Range<i64>,
    data: Vec<f32>,
}

impl Intermediate {
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Source rows held by this buffer.
    pub fn row_window(&self) -> Range<i64> {
        self.rows.clone()
    }

    /// Sample at output column `x`, source row `row`. Panics outside the window.
    pub fn get(&self, x: u32, row: i64, c: usize) -> f32 {
        assert!(x < self.width && c < CHANNELS);
        self.row(row)[(x as usize) * CHANNELS + c]
    }

    pub(crate) fn row(&self, row: i64) -> &[f32] {
        assert!(
            self.rows.contains(&row),
            "row {row} outside intermediate window {:?}",
            self.rows
        );
        let stride = self.stride();
        let start = ((row - self.rows.start) as usize) * stride;
        &self.data[start..start + stride]
    }

    fn stride(&self) -> usize {
        (self.width as usize) * CHANNELS
    }
}

/// Horizontal-then-vertical convolution with per-coordinate kernel tables.
#[derive(Clone, Debug)]
pub struct SeparableConvolver {
    kernels_x: AxisKernels,
    kernels_y: AxisKernels,
    strategy: ExecutionStrategy,
}

impl SeparableConvolver {
    pub fn new(
        kernels_x: AxisKernels,
        kernels_y: AxisKernels,
        strategy: ExecutionStrategy,
    ) -> ResampleResult<Self> {
        if kernels_x.axis() != Axis::X || kernels_y.axis() != Axis::Y {
            return Err(ResampleError::validation(
                "separable convolver expects x kernels then y kernels",
            ));
        }
        if kernels_x.is_empty() || kernels_y.is_empty() {
            return Err(ResampleError::validation(
                "separable convolver needs at least one output coordinate per axis",
            ));
        }
        if u32::try_from(kernels_x.len()).is_err() || u32::try_from(kernels_y.len()).is_err() {
            return Err(ResampleError::validation("output size overflow"));
        }
        Ok(Self {
            kernels_x,
            kernels_y,
            strategy,
        })
    }

    pub fn kernels_x(&self) -> &AxisKernels {
        &self.kernels_x
    }

    pub fn kernels_y(&self) -> &AxisKernels {
        &self.kernels_y
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn output_size(&self) -> (u32, u32) {
        (self.kernels_x.len() as u32, self.kernels_y.len() as u32)
    }

    /// Both passes, without the final range clamp.
    pub fn convolve(&self, src: &Image) -> ResampleResult<Image> {
        let sampler = ClampedSampler::new(src);
        let intermediate = self.horizontal_pass(&sampler);
        self.vertical_pass(&intermediate)
    }

    /// Filter every source row the vertical taps can reach along x.
    pub fn horizontal_pass(&self, src: &ClampedSampler<'_>) -> Intermediate {
        let rows = self.kernels_y.source_window();
        let (width, _) = self.output_size();
        let stride = (width as usize) * CHANNELS;
        let row_count = (rows.end - rows.start) as usize;
        tracing::debug!(
            taps = self.kernels_x.tap_count(),
            rows_start = rows.start,
            rows_end = rows.end,
            "horizontal pass"
        );

        let mut data = vec![0.0f32; stride * row_count];
        let kernels = &self.kernels_x;
        let vectorize = self.strategy.vectorize();
        for_each_row(&mut data, stride, self.strategy.parallelize(), |i, out| {
            let src_row = src.row(rows.start + i as i64);
            if vectorize {
                horizontal_row_lanes(&src_row, kernels, out);
            } else {
                horizontal_row(&src_row, kernels, out);
            }
        });

        Intermediate { width, rows, data }
    }

    /// Filter the intermediate buffer along y into a newly allocated image.
    pub fn vertical_pass(&self, intermediate: &Intermediate) -> ResampleResult<Image> {
        let (width, height) = self.output_size();
        let mut dst = Image::new(width, height)?;
        self.vertical_pass_into(intermediate, &mut dst)?;
        Ok(dst)
    }

    /// Filter the intermediate buffer along y into `dst`, which must match the output size.
    pub fn vertical_pass_into(
        &self,
        intermediate: &Intermediate,
        dst: &mut Image,
    ) -> ResampleResult<()> {
        let (width, height) = self.output_size();
        if (dst.width(), dst.height()) != (width, height) {
            return Err(ResampleError::validation(format!(
                "destination is {}x{}, expected {width}x{height}",
                dst.width(),
                dst.height()
            )));
        }
        if intermediate.width() != width {
            return Err(ResampleError::validation(format!(
                "intermediate width {} does not match output width {width}",
                intermediate.width()
            )));
        }
        let needed = self.kernels_y.source_window();
        let held = intermediate.row_window();
        if needed.start < held.start || needed.end > held.end {
            return Err(ResampleError::validation(format!(
                "intermediate rows {held:?} do not cover vertical taps {needed:?}"
            )));
        }
        tracing::debug!(taps = self.kernels_y.tap_count(), "vertical pass");

        let stride = dst.row_stride();
        let kernels = &self.kernels_y;
        let vectorize = self.strategy.vectorize();
        for_each_row(dst.data_mut(), stride, self.strategy.parallelize(), |y, out| {
            let table = kernels.table(y);
            if vectorize {
                vertical_row_lanes(intermediate, table, out);
            } else {
                vertical_row(intermediate, table, out);
            }
        });
        Ok(())
    }
}

fn horizontal_row(src: &ClampedRow<'_>, kernels: &AxisKernels, out: &mut [f32]) {
    for (table, px) in kernels.tables().iter().zip(out.chunks_exact_mut(CHANNELS)) {
        let mut acc = [0.0f32; CHANNELS];
        for (sx, w) in table.taps() {
            for (a, &v) in acc.iter_mut().zip(src.pixel(sx)) {
                *a += w * v;
            }
        }
        px.copy_from_slice(&acc);
    }
}

// Same per-sample accumulation order as `horizontal_row`, so results are bit-identical.
fn horizontal_row_lanes(src: &ClampedRow<'_>, kernels: &AxisKernels, out: &mut [f32]) {
    let taps = kernels.tap_count();
    for (group, out_group) in kernels
        .tables()
        .chunks(LANES)
        .zip(out.chunks_mut(LANES * CHANNELS))
    {
        let mut acc = [[0.0f32; CHANNELS]; LANES];
        for k in 0..taps {
            for (lane, table) in acc.iter_mut().zip(group) {
                let w = table.weights()[k];
                for (a, &v) in lane.iter_mut().zip(src.pixel(table.begin() + k as i64)) {
                    *a += w * v;
                }
            }
        }
        for (px, lane) in out_group.chunks_exact_mut(CHANNELS).zip(&acc) {
            px.copy_from_slice(lane);
        }
    }
}

fn vertical_row(intermediate: &Intermediate, table: &KernelTable, out: &mut [f32]) {
    let rows = table
        .taps()
        .map(|(sy, _)| intermediate.row(sy))
        .collect::<Vec<_>>();
    for (i, v) in out.iter_mut().enumerate() {
        let mut acc = 0.0f32;
        for (row, &w) in rows.iter().zip(table.weights()) {
            acc += w * row[i];
        }
        *v = acc;
    }
}

fn vertical_row_lanes(intermediate: &Intermediate, table: &KernelTable, out: &mut [f32]) {
    const GROUP: usize = LANES * CHANNELS;
    let rows = table
        .taps()
        .map(|(sy, _)| intermediate.row(sy))
        .collect::<Vec<_>>();
    for (start, out_group) in (0..).step_by(GROUP).zip(out.chunks_mut(GROUP)) {
        let mut acc = [0.0f32; GROUP];
        let acc = &mut acc[..out_group.len()];
        for (row, &w) in rows.iter().zip(table.weights()) {
            for (a, &s) in acc.iter_mut().zip(&row[start..start + out_group.len()]) {
                *a += w * s;
            }
        }
        out_group.copy_from_slice(acc);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convolve/separable.rs"]
mod tests;
