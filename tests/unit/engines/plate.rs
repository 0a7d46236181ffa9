use super::*;

fn square(n: u32, m: u32, superposition: Superposition, resolution: usize) -> PlateFrame {
    PlateEngine::compute_frame(
        &PlateParams { n, m, resolution },
        SimTime::ZERO,
        &PlateOptions {
            shape: PlateShape::Square,
            superposition,
        },
    )
    .unwrap()
}

fn circular(n: u32, m: u32, resolution: usize) -> PlateFrame {
    PlateEngine::compute_frame(
        &PlateParams { n, m, resolution },
        SimTime::ZERO,
        &PlateOptions {
            shape: PlateShape::Circular,
            ..PlateOptions::default()
        },
    )
    .unwrap()
}

#[test]
fn square_difference_with_equal_modes_vanishes() {
    for n in [1u32, 2, 7] {
        let f = square(n, n, Superposition::Difference, 64);
        assert!(f.field.values.iter().all(|v| *v == Some(0.0)));
        assert!(f.derived.identically_zero);
        assert!(f.derived.nodal_lines.is_empty());
    }
}

#[test]
fn square_sum_matches_closed_form() {
    let f = square(3, 5, Superposition::Sum, 21);
    let g = &f.field.grid;
    for (row, col) in [(0usize, 0usize), (4, 17), (10, 10), (20, 3)] {
        let (x, y) = (g.coords[col], g.coords[row]);
        let want = (3.0 * PI * x).cos() * (5.0 * PI * y).cos()
            + (5.0 * PI * x).cos() * (3.0 * PI * y).cos();
        assert!((f.field.get(col, row).unwrap() - want).abs() < 1e-12);
    }
    assert!(!f.derived.identically_zero);
    assert!(!f.derived.nodal_lines.is_empty());
    assert_eq!(f.derived.eigenvalue, None);
}

#[test]
fn square_sum_and_difference_are_swapped_under_transpose() {
    // Z_diff(x, y) = -Z_diff(y, x); Z_sum is symmetric.
    let diff = square(2, 5, Superposition::Difference, 33);
    let sum = square(2, 5, Superposition::Sum, 33);
    for row in 0..33 {
        for col in 0..33 {
            let d = diff.field.get(col, row).unwrap();
            let dt = diff.field.get(row, col).unwrap();
            assert!((d + dt).abs() < 1e-12);
            let s = sum.field.get(col, row).unwrap();
            let st = sum.field.get(row, col).unwrap();
            assert!((s - st).abs() < 1e-12);
        }
    }
}

#[test]
fn amplitude_is_abs_of_field() {
    let f = square(1, 4, Superposition::Sum, 40);
    for (z, a) in f.field.values.iter().zip(&f.amplitude) {
        assert_eq!(z.map(f64::abs), *a);
        assert!(a.unwrap() >= 0.0);
    }
    assert!(f.derived.max_amplitude <= 2.0 + 1e-12);
}

#[test]
fn circular_masks_exactly_outside_unit_disc() {
    let f = circular(2, 3, 51);
    let g = &f.field.grid;
    for row in 0..51 {
        for col in 0..51 {
            let r = g.coords[col].hypot(g.coords[row]);
            let z = f.field.get(col, row);
            let a = f.amplitude[g.index(col, row)];
            if r > 1.0 {
                assert!(z.is_none() && a.is_none());
            } else {
                assert!(z.is_some());
                assert!(a.unwrap() >= 0.0);
            }
        }
    }
}

#[test]
fn circular_uses_bessel_zero_and_vanishes_on_rim() {
    let f = circular(1, 1, 101);
    assert_eq!(f.derived.eigenvalue_source, Some(EigenvalueSource::BesselZero));
    let k = f.derived.eigenvalue.unwrap();
    assert!((k - 3.831_705_970_207_512).abs() < 1e-9);
    // (1, 0) sits on the rim where J_1(k) = 0.
    let g = &f.field.grid;
    let z = f.field.get(100, 50).unwrap();
    let p = g.point(100, 50);
    assert_eq!(p.x, 1.0);
    assert!(p.y.abs() < 1e-12);
    assert!(z.abs() < 1e-9);
}

#[test]
fn circular_nodal_diameters_follow_angular_mode() {
    // cos(2θ) vanishes on the diagonals.
    let f = circular(1, 2, 41);
    for i in 0..41 {
        let z = f.field.get(i, i);
        if let Some(z) = z {
            assert!(z.abs() < 1e-12);
        }
    }
}

#[test]
fn unsupported_order_falls_back_to_n_pi() {
    let (k, source) = circular_eigenvalue(2, crate::foundation::bessel::MAX_BESSEL_ORDER + 1);
    assert_eq!(source, EigenvalueSource::Fallback);
    assert!((k - 2.0 * PI).abs() < 1e-12);

    let f = circular(1, crate::foundation::bessel::MAX_BESSEL_ORDER + 1, 9);
    assert_eq!(f.derived.eigenvalue_source, Some(EigenvalueSource::Fallback));
    assert!(f.field.defined().all(f64::is_finite));
}

#[test]
fn zero_mode_indices_are_domain_errors() {
    let opts = PlateOptions::default();
    let err = PlateEngine::compute_frame(
        &PlateParams {
            n: 0,
            m: 2,
            resolution: 10,
        },
        SimTime::ZERO,
        &opts,
    )
    .unwrap_err();
    assert_eq!(err.parameter(), Some("n"));

    let err = PlateEngine::compute_frame(
        &PlateParams {
            n: 2,
            m: 0,
            resolution: 10,
        },
        SimTime::ZERO,
        &opts,
    )
    .unwrap_err();
    assert_eq!(err.parameter(), Some("m"));

    let err = PlateEngine::compute_frame(
        &PlateParams {
            n: 2,
            m: 2,
            resolution: 1,
        },
        SimTime::ZERO,
        &opts,
    )
    .unwrap_err();
    assert_eq!(err.parameter(), Some("resolution"));
}

#[test]
fn full_resolution_grid_is_sampled() {
    let f = circular(3, 5, 500);
    assert_eq!(f.field.values.len(), 500 * 500);
    assert!(f.field.defined().all(f64::is_finite));
    assert!(!f.derived.nodal_lines.is_empty());
}

#[test]
fn option_enums_parse() {
    assert_eq!("Circular Plate".parse::<PlateShape>().unwrap(), PlateShape::Circular);
    assert_eq!("sum".parse::<Superposition>().unwrap(), Superposition::Sum);
    assert!("hexagon".parse::<PlateShape>().unwrap_err().is_config());
    assert!("product".parse::<Superposition>().unwrap_err().is_config());
}
