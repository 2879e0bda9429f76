use super::*;

#[test]
fn config_rejects_bad_scale_factors() {
    for s in [0.0, -2.0, f64::NAN] {
        let err = ResampleConfig::new(s, InterpolationType::Box).unwrap_err();
        assert!(matches!(err, ResampleError::Validation(_)));
    }
}

#[test]
fn config_builders_return_new_values() {
    let base = ResampleConfig::new(2.0, InterpolationType::Cubic).unwrap();
    let tuned = base
        .with_strategy(ExecutionStrategy::VectorizedParallel)
        .with_threads(Some(2))
        .unwrap();
    assert_eq!(base.strategy(), ExecutionStrategy::Serial);
    assert_eq!(base.threads(), None);
    assert_eq!(tuned.strategy(), ExecutionStrategy::VectorizedParallel);
    assert_eq!(tuned.threads(), Some(2));
    assert_eq!(tuned.scale_factor(), base.scale_factor());
    assert!(base.with_threads(Some(0)).is_err());
}

#[test]
fn config_serde_shape_is_stable() {
    let cfg = ResampleConfig::new(0.5, InterpolationType::Linear)
        .unwrap()
        .with_strategy(ExecutionStrategy::Parallel);
    let json = serde_json::to_value(cfg).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "scale_factor": 0.5,
            "interpolation": "linear",
            "strategy": "parallel",
            "threads": null
        })
    );

    let parsed: ResampleConfig =
        serde_json::from_str(r#"{"scale_factor": 3.0, "interpolation": "box"}"#).unwrap();
    assert_eq!(parsed.strategy(), ExecutionStrategy::Serial);
    assert_eq!(parsed.interpolation(), InterpolationType::Box);

    assert!(
        serde_json::from_str::<ResampleConfig>(r#"{"scale_factor": 0, "interpolation": "box"}"#)
            .is_err()
    );
}

#[test]
fn resampler_reports_sizes() {
    let cfg = ResampleConfig::new(1.5, InterpolationType::Cubic).unwrap();
    let r = Resampler::new(5, 3, &cfg).unwrap();
    assert_eq!(r.source_size(), (5, 3));
    assert_eq!(r.output_size(), (8, 5));
    assert_eq!(r.convolver().kernels_x().len(), 8);
    assert_eq!(r.convolver().kernels_y().len(), 5);
}

#[test]
fn resampler_rejects_mismatched_images() {
    let cfg = ResampleConfig::new(2.0, InterpolationType::Box).unwrap();
    let r = Resampler::new(4, 4, &cfg).unwrap();

    let wrong_src = Image::new(3, 4).unwrap();
    assert!(r.run(&wrong_src).is_err());

    let src = Image::new(4, 4).unwrap();
    let mut wrong_dst = Image::new(4, 4).unwrap();
    assert!(r.run_into(&src, &mut wrong_dst).is_err());
}

#[test]
fn resampler_rejects_zero_sized_sources() {
    let cfg = ResampleConfig::new(2.0, InterpolationType::Box).unwrap();
    assert!(Resampler::new(0, 4, &cfg).is_err());
}

#[test]
fn dedicated_pool_only_for_parallel_strategies() {
    let cfg = ResampleConfig::new(2.0, InterpolationType::Box)
        .unwrap()
        .with_threads(Some(2))
        .unwrap();
    assert!(Resampler::new(4, 4, &cfg).unwrap().pool.is_none());

    let cfg = cfg.with_strategy(ExecutionStrategy::Parallel);
    let r = Resampler::new(4, 4, &cfg).unwrap();
    assert_eq!(r.pool.as_ref().map(|p| p.current_num_threads()), Some(2));
}

#[test]
fn resample_into_matches_resample() {
    let src = Image::from_fn(6, 4, |x, y, c| ((x + y + c as u32) % 3) as f32 / 2.0).unwrap();
    let cfg = ResampleConfig::new(0.7, InterpolationType::Cubic).unwrap();
    let out = resample(&src, &cfg).unwrap();
    let mut dst = Image::new(out.width(), out.height()).unwrap();
    resample_into(&src, &cfg, &mut dst).unwrap();
    assert_eq!(dst, out);
}
