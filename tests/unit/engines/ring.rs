use super::*;

#[test]
fn radius_is_periodic_in_time() {
    let p = LoopParams {
        mode: 4,
        amplitude: 0.3,
        angular_speed: 2.7,
        base_radius: 1.0,
    };
    let period = p.period().unwrap();
    for i in 0..40 {
        let theta = f64::from(i) * 0.157;
        let t = f64::from(i) * 0.091;
        let a = radius_at(&p, theta, SimTime(t)).unwrap();
        let b = radius_at(&p, theta, SimTime(t + period)).unwrap();
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn radius_repeats_every_angular_wavelength() {
    for mode in [2u32, 3, 7, 20] {
        let p = LoopParams {
            mode,
            ..LoopParams::default()
        };
        let shift = TAU / f64::from(mode);
        for i in 0..50 {
            let theta = f64::from(i) * 0.123;
            let t = SimTime(f64::from(i) * 0.05);
            let a = radius_at(&p, theta, t).unwrap();
            let b = radius_at(&p, theta + shift, t).unwrap();
            assert!((a - b).abs() < 1e-9);
        }
    }
}

#[test]
fn outline_is_closed_and_matches_radii() {
    let p = LoopParams::default();
    let f = LoopEngine::compute_frame(&p, SimTime(0.4), &LoopOptions::default()).unwrap();
    assert_eq!(f.radii.len(), 1000);
    assert_eq!(f.outline.len(), 1001);
    assert_eq!(f.outline.first(), f.outline.last());
    assert_eq!(f.radii.positions[0], 0.0);
    assert!(*f.radii.positions.last().unwrap() < TAU);
    for ((theta, r), pt) in f.radii.pairs().zip(&f.outline) {
        assert!((pt.x.hypot(pt.y) - r).abs() < 1e-12);
        assert!((pt.y.atan2(pt.x).rem_euclid(TAU) - theta).abs() < 1e-9 || theta == 0.0);
    }
    assert!((f.derived.extent - 1.2).abs() < 1e-12);
}

#[test]
fn rest_phase_is_a_circle() {
    let p = LoopParams::default();
    let quarter = p.period().unwrap() / 4.0;
    let f = LoopEngine::compute_frame(&p, SimTime(quarter), &LoopOptions::default()).unwrap();
    assert!(f.derived.phase.abs() < 1e-12);
    assert!(f.radii.values.iter().all(|r| (r - 1.0).abs() < 1e-12));
}

#[test]
fn period_sequence_matches_real_time_frames() {
    let p = LoopParams::default();
    let opts = LoopOptions::default();
    let seq = period_sequence(&p, &opts, EXPORT_FRAMES).unwrap();
    assert_eq!(seq.len(), EXPORT_FRAMES as usize);

    let period = p.period().unwrap();
    for (i, frame) in seq.iter().enumerate() {
        let t = SimTime(i as f64 * period / f64::from(EXPORT_FRAMES));
        let direct = LoopEngine::compute_frame(&p, t, &opts).unwrap();
        assert_eq!(&direct, frame);
    }
    assert_eq!(seq[0].derived.phase, 1.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let opts = LoopOptions::default();
    let cases = [
        (
            LoopParams {
                mode: 1,
                ..LoopParams::default()
            },
            "mode",
        ),
        (
            LoopParams {
                amplitude: 0.0,
                ..LoopParams::default()
            },
            "amplitude",
        ),
        (
            LoopParams {
                angular_speed: -2.0,
                ..LoopParams::default()
            },
            "angular_speed",
        ),
        (
            LoopParams {
                base_radius: 0.0,
                ..LoopParams::default()
            },
            "base_radius",
        ),
    ];
    for (p, name) in cases {
        let err = LoopEngine::compute_frame(&p, SimTime::ZERO, &opts).unwrap_err();
        assert_eq!(err.parameter(), Some(name));
    }

    let err = LoopEngine::compute_frame(
        &LoopParams::default(),
        SimTime::ZERO,
        &LoopOptions { samples: 100 },
    )
    .unwrap_err();
    assert!(err.is_config());
    assert!(period_sequence(&LoopParams::default(), &opts, 0).unwrap_err().is_config());
}
