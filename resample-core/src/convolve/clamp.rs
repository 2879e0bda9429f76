use crate::foundation::core::Image;

/// Final range restriction to `[0, 1]`.
///
/// The cubic kernel's negative lobes can ring past the input range even when every input
/// sample is in range.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputClamp;

impl OutputClamp {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;

    pub fn clamp_sample(v: f32) -> f32 {
        v.clamp(Self::MIN, Self::MAX)
    }

    pub fn apply(image: &mut Image) {
        for v in image.data_mut() {
            *v = Self::clamp_sample(*v);
        }
    }
}
