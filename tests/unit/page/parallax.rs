use super::*;

#[test]
fn offsets_are_negative_scroll_times_speed() {
    let mut p = ParallaxController::new();
    p.register("bg", 0.2).unwrap();
    p.register("fg", -0.1).unwrap();
    assert_eq!(p.offsets(500.0), vec![("bg", -100.0), ("fg", 50.0)]);
    assert_eq!(p.offset_for("bg", 0.0), Some(-0.0));
    assert_eq!(p.offset_for("missing", 10.0), None);
}

#[test]
fn registering_again_updates_speed() {
    let mut p = ParallaxController::new();
    p.register("bg", 0.2).unwrap();
    p.register("bg", 0.5).unwrap();
    assert_eq!(p.layers().len(), 1);
    assert_eq!(p.offset_for("bg", 100.0), Some(-50.0));
}

#[test]
fn rejects_non_finite_speed_and_ignores_non_finite_scroll() {
    let mut p = ParallaxController::new();
    assert!(p.register("bg", f64::NAN).is_err());
    p.register("bg", 1.0).unwrap();
    assert_eq!(p.offset_for("bg", f64::INFINITY), Some(0.0));
}
