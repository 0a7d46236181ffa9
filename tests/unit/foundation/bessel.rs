use super::*;

fn assert_close(got: f64, want: f64, tol: f64) {
    assert!(
        (got - want).abs() <= tol,
        "got {got}, want {want} (tol {tol})"
    );
}

#[test]
fn values_at_origin() {
    assert_eq!(bessel_j(0, 0.0), 1.0);
    assert_eq!(bessel_j(1, 0.0), 0.0);
    assert_eq!(bessel_j(7, 0.0), 0.0);
}

#[test]
fn matches_reference_values() {
    assert_close(bessel_j(0, 1.0), 0.765_197_686_557_966_6, 1e-10);
    assert_close(bessel_j(1, 1.0), 0.440_050_585_744_933_5, 1e-10);
    assert_close(bessel_j(2, 5.0), 0.046_565_116_277_752_2, 1e-10);
    assert_close(bessel_j(5, 10.0), -0.234_061_528_186_793_6, 1e-10);
    assert_close(bessel_j(0, 0.5), 0.938_469_807_240_813, 1e-12);
}

#[test]
fn series_and_recurrence_agree_across_the_switch() {
    for order in 0..6 {
        let below = bessel_j(order, 1.0 - 1e-9);
        let above = bessel_j(order, 1.0 + 1e-9);
        assert_close(below, above, 1e-8);
    }
}

#[test]
fn parity_for_negative_arguments() {
    assert_close(bessel_j(1, -2.0), -bessel_j(1, 2.0), 1e-15);
    assert_close(bessel_j(2, -2.0), bessel_j(2, 2.0), 1e-15);
}

#[test]
fn recurrence_identity_holds_for_large_arguments() {
    // J_{n-1}(x) + J_{n+1}(x) = (2n/x) J_n(x)
    let x = 120.0;
    for n in [1u32, 10, 40] {
        let lhs = bessel_j(n - 1, x) + bessel_j(n + 1, x);
        let rhs = 2.0 * f64::from(n) / x * bessel_j(n, x);
        assert_close(lhs, rhs, 1e-10);
    }
}

#[test]
fn zeros_match_reference_values() {
    assert_close(bessel_j_zero(0, 1).unwrap(), 2.404_825_557_695_773, 1e-9);
    assert_close(bessel_j_zero(1, 1).unwrap(), 3.831_705_970_207_512, 1e-9);
    assert_close(bessel_j_zero(2, 2).unwrap(), 8.417_244_140_399_865, 1e-9);
    assert_close(bessel_j_zero(5, 3).unwrap(), 15.700_174_079_711_67, 1e-8);
}

#[test]
fn zeros_are_roots_and_increasing() {
    let mut prev = 0.0;
    for nth in 1..=10 {
        let z = bessel_j_zero(3, nth).unwrap();
        assert!(z > prev);
        assert!(bessel_j(3, z).abs() < 1e-10);
        prev = z;
    }
}

#[test]
fn unsupported_lookups_return_none() {
    assert_eq!(bessel_j_zero(2, 0), None);
    assert_eq!(bessel_j_zero(MAX_BESSEL_ORDER + 1, 1), None);
    assert_eq!(bessel_j_zero(0, MAX_ZERO_INDEX + 1), None);
}
