use super::*;
use crate::{foundation::core::ScaleFactor, kernel::catalog::InterpolationType};

fn convolver(
    kind: InterpolationType,
    scale: f64,
    src: &Image,
    strategy: ExecutionStrategy,
) -> SeparableConvolver {
    let s = ScaleFactor::new(scale).unwrap();
    let spec = kind.spec();
    let kx = AxisKernels::build(Axis::X, s.output_len(src.width()).unwrap(), s, &spec).unwrap();
    let ky = AxisKernels::build(Axis::Y, s.output_len(src.height()).unwrap(), s, &spec).unwrap();
    SeparableConvolver::new(kx, ky, strategy).unwrap()
}

fn pattern(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y, c| {
        let v = (x * 7 + y * 13 + c as u32 * 5) % 11;
        v as f32 / 10.0
    })
    .unwrap()
}

#[test]
fn intermediate_covers_the_vertical_halo() {
    let src = pattern(4, 4);
    let conv = convolver(InterpolationType::Cubic, 2.0, &src, ExecutionStrategy::Serial);
    let sampler = ClampedSampler::new(&src);
    let inter = conv.horizontal_pass(&sampler);

    let window = inter.row_window();
    assert_eq!(window, conv.kernels_y().source_window());
    assert!(window.start < 0, "window {window:?} should start above the image");
    assert!(window.end > 4, "window {window:?} should end below the image");
    assert_eq!(inter.width(), 8);

    for x in 0..8 {
        for c in 0..CHANNELS {
            assert_eq!(inter.get(x, window.start, c), inter.get(x, 0, c));
            assert_eq!(inter.get(x, window.end - 1, c), inter.get(x, 3, c));
        }
    }
}

#[test]
fn vertical_pass_rejects_a_short_window() {
    let src = pattern(4, 4);
    let narrow = convolver(InterpolationType::Box, 2.0, &src, ExecutionStrategy::Serial);
    let wide = convolver(InterpolationType::Cubic, 2.0, &src, ExecutionStrategy::Serial);

    let inter = narrow.horizontal_pass(&ClampedSampler::new(&src));
    let err = wide.vertical_pass(&inter).unwrap_err();
    assert!(err.to_string().contains("do not cover vertical taps"));
}

#[test]
fn vertical_pass_into_checks_destination_size() {
    let src = pattern(4, 4);
    let conv = convolver(InterpolationType::Linear, 2.0, &src, ExecutionStrategy::Serial);
    let inter = conv.horizontal_pass(&ClampedSampler::new(&src));
    let mut wrong = Image::new(4, 4).unwrap();
    assert!(conv.vertical_pass_into(&inter, &mut wrong).is_err());

    let mut right = Image::new(8, 8).unwrap();
    conv.vertical_pass_into(&inter, &mut right).unwrap();
    assert_eq!(right, conv.vertical_pass(&inter).unwrap());
}

#[test]
fn horizontal_pass_matches_direct_tap_sums() {
    let src = pattern(5, 3);
    let conv = convolver(InterpolationType::Cubic, 1.7, &src, ExecutionStrategy::Serial);
    let sampler = ClampedSampler::new(&src);
    let inter = conv.horizontal_pass(&sampler);

    for row in inter.row_window() {
        for (x, table) in conv.kernels_x().tables().iter().enumerate() {
            for c in 0..CHANNELS {
                let mut want = 0.0f32;
                for (sx, w) in table.taps() {
                    want += w * sampler.sample(sx, row, c);
                }
                assert_eq!(inter.get(x as u32, row, c), want);
            }
        }
    }
}

#[test]
fn strategies_are_bit_identical() {
    for (w, h, scale) in [(7, 5, 1.3), (13, 9, 0.45), (3, 3, 3.0), (1, 6, 2.2)] {
        let src = pattern(w, h);
        for kind in InterpolationType::ALL {
            let base = convolver(kind, scale, &src, ExecutionStrategy::Serial)
                .convolve(&src)
                .unwrap();
            for strategy in ExecutionStrategy::ALL {
                let out = convolver(kind, scale, &src, strategy).convolve(&src).unwrap();
                let same = out
                    .data()
                    .iter()
                    .zip(base.data())
                    .all(|(a, b)| a.to_bits() == b.to_bits());
                assert!(same, "{kind} {strategy:?} {w}x{h}@{scale} differs from serial");
            }
        }
    }
}

#[test]
fn cubic_step_rings_before_clamping() {
    let src = Image::from_fn(4, 1, |x, _, _| if x < 2 { 0.0 } else { 1.0 }).unwrap();
    let conv = convolver(InterpolationType::Cubic, 2.0, &src, ExecutionStrategy::Serial);
    let out = conv.convolve(&src).unwrap();
    let min = out.data().iter().copied().fold(f32::INFINITY, f32::min);
    let max = out.data().iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!(min < -0.05, "min {min}");
    assert!(max > 1.05, "max {max}");
}

#[test]
fn rejects_swapped_axes() {
    let s = ScaleFactor::new(1.0).unwrap();
    let spec = InterpolationType::Box.spec();
    let kx = AxisKernels::build(Axis::X, 2, s, &spec).unwrap();
    let ky = AxisKernels::build(Axis::Y, 2, s, &spec).unwrap();
    assert!(SeparableConvolver::new(ky, kx, ExecutionStrategy::Serial).is_err());
}

#[test]
fn rejects_empty_axes() {
    let s = ScaleFactor::new(1.0).unwrap();
    let spec = InterpolationType::Box.spec();
    let kx = AxisKernels::build(Axis::X, 0, s, &spec).unwrap();
    let ky = AxisKernels::build(Axis::Y, 2, s, &spec).unwrap();
    assert!(SeparableConvolver::new(kx, ky, ExecutionStrategy::Serial).is_err());
}
