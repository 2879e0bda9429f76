use crate::foundation::error::{ResampleError, ResampleResult};

/// Number of interleaved channels in every [`Image`].
pub const CHANNELS: usize = 3;

/// Dense, interleaved, row-major RGB float image.
///
/// Sample `(x, y, c)` lives at `((y * width) + x) * 3 + c`. Values are conventionally in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Image {
    /// Allocate a zero-filled image.
    pub fn new(width: u32, height: u32) -> ResampleResult<Self> {
        Self::filled(width, height, 0.0)
    }

    /// Allocate an image with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: f32) -> ResampleResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Wrap an existing interleaved buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<f32>) -> ResampleResult<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(ResampleError::validation(format!(
                "image buffer has {} samples, expected {width}*{height}*{CHANNELS} = {len}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y, c)` for every sample in row-major order.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32, usize) -> f32,
    ) -> ResampleResult<Self> {
        let len = buffer_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                for c in 0..CHANNELS {
                    data.push(f(x, y, c));
                }
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        CHANNELS
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<f32> {
        self.data
    }

    /// Sample at `(x, y, c)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32, c: usize) -> f32 {
        assert!(x < self.width && y < self.height && c < CHANNELS);
        self.data[self.index(x, y, c)]
    }

    /// Samples of row `y` (`width * 3` values).
    pub(crate) fn row(&self, y: u32) -> &[f32] {
        let stride = self.row_stride();
        let start = (y as usize) * stride;
        &self.data[start..start + stride]
    }

    pub(crate) fn row_stride(&self) -> usize {
        (self.width as usize) * CHANNELS
    }

    fn index(&self, x: u32, y: u32, c: usize) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * CHANNELS + c
    }
}

fn buffer_len(width: u32, height: u32) -> ResampleResult<usize> {
    if width == 0 || height == 0 {
        return Err(ResampleError::validation(format!(
            "image dimensions must be >= 1 (got {width}x{height})"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(CHANNELS))
        .ok_or_else(|| ResampleError::validation("image buffer size overflow"))
}

/// Positive resampling factor: `< 1` downscales, `> 1` upscales.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> ResampleResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ResampleError::validation(format!(
                "scale factor must be a finite value > 0 (got {value})"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// `min(scale, 1)`: the factor that stretches kernels when downscaling.
    pub fn kernel_scaling(self) -> f64 {
        self.0.min(1.0)
    }

    /// Output length along one axis: `round(len * scale)`, never below 1.
    pub fn output_len(self, len: u32) -> ResampleResult<u32> {
        let scaled = (f64::from(len) * self.0).round().max(1.0);
        if scaled > f64::from(u32::MAX) {
            return Err(ResampleError::validation(format!(
                "output length overflow: {len} * {} does not fit in u32",
                self.0
            )));
        }
        Ok(scaled as u32)
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = ResampleError;

    fn try_from(value: f64) -> ResampleResult<Self> {
        Self::new(value)
    }
}

impl From<ScaleFactor> for f64 {
    fn from(value: ScaleFactor) -> Self {
        value.0
    }
}

/// Output size for a `width x height` source at `scale`.
pub fn output_dimensions(width: u32, height: u32, scale: ScaleFactor) -> ResampleResult<(u32, u32)> {
    Ok((scale.output_len(width)?, scale.output_len(height)?))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
