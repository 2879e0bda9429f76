use crate::foundation::core::{CHANNELS, Image};

/// Clamp-to-edge view of a source image.
///
/// Coordinates outside the image are mapped to the nearest edge pixel, independently per axis.
/// Channels are not clamped.
#[derive(Clone, Copy, Debug)]
pub struct ClampedSampler<'a> {
    image: &'a Image,
    max_x: i64,
    max_y: i64,
}

impl<'a> ClampedSampler<'a> {
    pub fn new(image: &'a Image) -> Self {
        Self {
            image,
            max_x: i64::from(image.width()) - 1,
            max_y: i64::from(image.height()) - 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn sample(&self, x: i64, y: i64, c: usize) -> f32 {
        self.row(y).pixel(x)[c]
    }

    pub(crate) fn row(&self, y: i64) -> ClampedRow<'a> {
        let y = y.clamp(0, self.max_y) as u32;
        ClampedRow {
            samples: self.image.row(y),
            max_x: self.max_x,
        }
    }
}

/// One source row with clamped column addressing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ClampedRow<'a> {
    samples: &'a [f32],
    max_x: i64,
}

impl<'a> ClampedRow<'a> {
    #[inline]
    pub(crate) fn pixel(&self, x: i64) -> &'a [f32] {
        let start = (x.clamp(0, self.max_x) as usize) * CHANNELS;
        &self.samples[start..start + CHANNELS]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convolve/sampler.rs"]
mod tests;
