use proptest::prelude::*;

use super::*;

#[test]
fn boundaries_map_to_first_and_last_frame() {
    assert_eq!(target_frame_for_fraction(0.0, 248), 0.0);
    assert_eq!(target_frame_for_fraction(1.0, 248), 247.0);
    assert_eq!(target_frame_for_fraction(0.5, 248), 124.0);
}

#[test]
fn single_frame_sequence_always_targets_zero() {
    assert_eq!(target_frame_for_fraction(0.0, 1), 0.0);
    assert_eq!(target_frame_for_fraction(0.7, 1), 0.0);
    assert_eq!(target_frame_for_fraction(1.0, 1), 0.0);
}

#[test]
fn out_of_range_fractions_are_clamped() {
    assert_eq!(target_frame_for_fraction(-2.0, 10), 0.0);
    assert_eq!(target_frame_for_fraction(3.0, 10), 9.0);
    assert_eq!(target_frame_for_fraction(f64::NAN, 10), 0.0);
}

#[test]
fn fraction_divides_by_scrollable_height() {
    let m = ScrollMetrics {
        scroll_top: 500.0,
        document_height: 3000.0,
        viewport_height: 1000.0,
    };
    assert_eq!(m.scrollable_height(), 2000.0);
    assert_eq!(m.fraction(), 0.25);
}

#[test]
fn non_scrollable_document_reports_zero() {
    let flat = ScrollMetrics {
        scroll_top: 10.0,
        document_height: 800.0,
        viewport_height: 800.0,
    };
    assert_eq!(flat.fraction(), 0.0);

    let short = ScrollMetrics {
        scroll_top: 10.0,
        document_height: 600.0,
        viewport_height: 800.0,
    };
    assert_eq!(short.fraction(), 0.0);
}

#[test]
fn overscroll_is_clamped() {
    let bounce = ScrollMetrics {
        scroll_top: -40.0,
        document_height: 3000.0,
        viewport_height: 1000.0,
    };
    assert_eq!(bounce.fraction(), 0.0);

    let past_end = ScrollMetrics {
        scroll_top: 2400.0,
        ..bounce
    };
    assert_eq!(past_end.fraction(), 1.0);
}

#[test]
fn at_fraction_inverts_fraction() {
    let m = ScrollMetrics::at_fraction(0.75, 5000.0, 1000.0);
    assert_eq!(m.scroll_top, 3000.0);
    assert_eq!(m.fraction(), 0.75);
}

proptest! {
    #[test]
    fn target_is_floor_of_scaled_fraction(fraction in 0.0f64..=1.0, n in 1u32..=2000) {
        let t = target_frame_for_fraction(fraction, n);
        let expected = (fraction * f64::from(n)).floor().clamp(0.0, f64::from(n - 1));
        prop_assert_eq!(t, expected);
        prop_assert!(t >= 0.0 && t <= f64::from(n - 1));
        prop_assert_eq!(t.fract(), 0.0);
    }

    #[test]
    fn target_is_monotonic_in_fraction(a in 0.0f64..=1.0, b in 0.0f64..=1.0, n in 1u32..=500) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(target_frame_for_fraction(lo, n) <= target_frame_for_fraction(hi, n));
    }
}
