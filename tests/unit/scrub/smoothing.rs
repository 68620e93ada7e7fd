use proptest::prelude::*;

use super::*;

#[test]
fn starts_at_rest_on_frame_zero() {
    let s = ScrubState::new(248);
    assert_eq!(s.target(), 0.0);
    assert_eq!(s.current(), 0.0);
    assert_eq!(s.displayed(), FrameIndex(0));
}

#[test]
fn single_step_moves_by_ease_fraction() {
    let mut s = ScrubState::new(248);
    s.set_target(100.0);
    let shown = s.advance_smoothing(DEFAULT_EASE);
    assert!((s.current() - 6.0).abs() < 1e-12);
    assert_eq!(shown, FrameIndex(6));
}

#[test]
fn displayed_frame_floors_current() {
    let mut s = ScrubState::new(10);
    s.set_target(9.0);
    s.advance_smoothing(0.5);
    assert_eq!(s.current(), 4.5);
    assert_eq!(s.displayed(), FrameIndex(4));
}

#[test]
fn scroll_target_uses_document_metrics() {
    let mut s = ScrubState::new(248);
    let target = s.apply_scroll_target(&ScrollMetrics::at_fraction(1.0, 4000.0, 1000.0));
    assert_eq!(target, 247.0);
    let target = s.apply_scroll_target(&ScrollMetrics {
        scroll_top: 50.0,
        document_height: 900.0,
        viewport_height: 1000.0,
    });
    assert_eq!(target, 0.0);
}

#[test]
fn set_target_clamps_into_sequence() {
    let mut s = ScrubState::new(5);
    assert_eq!(s.set_target(-3.0), 0.0);
    assert_eq!(s.set_target(12.0), 4.0);
    assert_eq!(s.set_target(f64::NAN), 0.0);
}

#[test]
fn convergence_tick_count_scales_with_log_epsilon_over_ease() {
    let ease = DEFAULT_EASE;
    let distance = 247.0;
    let epsilon = 1e-3;

    let mut s = ScrubState::new(248);
    s.set_target(distance);
    let mut ticks = 0u32;
    while !s.is_settled(epsilon) {
        s.advance_smoothing(ease);
        ticks += 1;
        assert!(ticks < 10_000, "smoothing failed to converge");
    }

    // Residual after k ticks is distance * (1 - e)^k; solve for the bound.
    let bound = ((distance / epsilon).ln() / ease).ceil() as u32;
    assert!(ticks <= bound, "ticks={ticks} bound={bound}");
}

proptest! {
    #[test]
    fn smoothing_is_monotonic_without_overshoot(
        start in 0.0f64..=247.0,
        target in 0.0f64..=247.0,
        ease in 0.001f64..1.0,
        steps in 1usize..300,
    ) {
        let mut s = ScrubState::new(248);
        s.set_target(start);
        s.advance_smoothing(1.0);
        prop_assert_eq!(s.current(), start);

        s.set_target(target);
        let mut prev_gap = (target - s.current()).abs();
        for _ in 0..steps {
            let before = s.current();
            s.advance_smoothing(ease);
            let gap = (target - s.current()).abs();
            prop_assert!(gap <= prev_gap + 1e-9);
            if target >= before {
                prop_assert!(s.current() <= target + 1e-9);
                prop_assert!(s.current() >= before - 1e-9);
            } else {
                prop_assert!(s.current() >= target - 1e-9);
                prop_assert!(s.current() <= before + 1e-9);
            }
            prev_gap = gap;
        }
    }
}
