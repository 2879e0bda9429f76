use std::{fmt, str::FromStr};

use crate::foundation::error::{ResampleError, ResampleResult};

/// Catmull-Rom parameter of the cubic kernel.
const CUBIC_A: f64 = -0.5;

/// Kernel family used for both axes of a resample.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationType {
    /// Nearest-sample box filter, support 0.5.
    Box,
    /// Tent filter, support 1.0.
    #[default]
    Linear,
    /// Catmull-Rom cubic (`a = -0.5`), support 2.0.
    Cubic,
}

impl InterpolationType {
    /// Every kernel family, in CLI order.
    pub const ALL: [Self; 3] = [Self::Box, Self::Linear, Self::Cubic];

    pub fn name(self) -> &'static str {
        self.spec().name()
    }

    pub fn spec(self) -> KernelSpec {
        match self {
            Self::Box => BOX,
            Self::Linear => LINEAR,
            Self::Cubic => CUBIC,
        }
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationType {
    type Err = ResampleError;

    fn from_str(s: &str) -> ResampleResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                ResampleError::validation(format!(
                    "invalid interpolation type '{s}' (expected box, linear or cubic)"
                ))
            })
    }
}

/// A closed-form, even, compactly supported kernel.
#[derive(Clone, Copy, Debug)]
pub struct KernelSpec {
    name: &'static str,
    half_width: f64,
    weight: fn(f64) -> f64,
}

impl KernelSpec {
    pub(crate) const fn new(name: &'static str, half_width: f64, weight: fn(f64) -> f64) -> Self {
        Self {
            name,
            half_width,
            weight,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Distance beyond which [`KernelSpec::weight`] is zero.
    pub fn support_half_width(&self) -> f64 {
        self.half_width
    }

    /// Unnormalized weight at signed distance `d` from the sample point.
    pub fn weight(&self, d: f64) -> f64 {
        (self.weight)(d)
    }
}

const BOX: KernelSpec = KernelSpec::new("box", 0.5, box_weight);
const LINEAR: KernelSpec = KernelSpec::new("linear", 1.0, linear_weight);
const CUBIC: KernelSpec = KernelSpec::new("cubic", 2.0, cubic_weight);

fn box_weight(d: f64) -> f64 {
    if d.abs() <= 0.5 { 1.0 } else { 0.0 }
}

fn linear_weight(d: f64) -> f64 {
    let x = d.abs();
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

fn cubic_weight(d: f64) -> f64 {
    let x = d.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    let a = CUBIC_A;
    if x < 1.0 {
        (a + 2.0) * x3 - (a + 3.0) * x2 + 1.0
    } else if x < 2.0 {
        a * x3 - 5.0 * a * x2 + 8.0 * a * x - 4.0 * a
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/catalog.rs"]
mod tests;
