use super::*;

fn ramp() -> Image {
    Image::from_fn(3, 2, |x, y, c| (y * 10 + x) as f32 + c as f32 * 0.1).unwrap()
}

#[test]
fn in_range_reads_match_image() {
    let img = ramp();
    let s = ClampedSampler::new(&img);
    for y in 0..2 {
        for x in 0..3 {
            for c in 0..CHANNELS {
                assert_eq!(s.sample(i64::from(x), i64::from(y), c), img.get(x, y, c));
            }
        }
    }
}

#[test]
fn coordinates_clamp_to_edges_independently() {
    let img = ramp();
    let s = ClampedSampler::new(&img);
    assert_eq!(s.sample(-5, 0, 0), img.get(0, 0, 0));
    assert_eq!(s.sample(99, 0, 1), img.get(2, 0, 1));
    assert_eq!(s.sample(1, -3, 2), img.get(1, 0, 2));
    assert_eq!(s.sample(1, 7, 0), img.get(1, 1, 0));
    assert_eq!(s.sample(-1, 9, 2), img.get(0, 1, 2));
}

#[test]
fn single_pixel_image_answers_every_coordinate() {
    let img = Image::from_raw(1, 1, vec![0.1, 0.2, 0.3]).unwrap();
    let s = ClampedSampler::new(&img);
    for (x, y) in [(-10, -10), (0, 0), (10, 3), (i64::MAX, i64::MIN)] {
        assert_eq!(s.sample(x, y, 1), 0.2);
    }
}

#[test]
#[should_panic]
fn channel_is_not_clamped() {
    let img = ramp();
    let s = ClampedSampler::new(&img);
    let _ = s.sample(0, 0, CHANNELS);
}
