use super::*;

#[test]
fn counted_clock_yields_exact_tick_count() {
    let mut c = CountedClock::new(3);
    assert!(c.wait_next());
    assert!(c.wait_next());
    assert_eq!(c.remaining(), 1);
    assert!(c.wait_next());
    assert!(!c.wait_next());
    assert!(!c.wait_next());
}

#[test]
fn interval_clock_spaces_ticks_by_period() {
    let mut c = IntervalClock::new(Duration::from_millis(5));
    let start = Instant::now();
    for _ in 0..3 {
        assert!(c.wait_next());
    }
    // First tick is immediate; the next two wait a full period each.
    assert!(start.elapsed() >= Duration::from_millis(10));
}

#[test]
fn interval_clock_has_a_floor_period() {
    assert_eq!(
        IntervalClock::new(Duration::ZERO).period(),
        Duration::from_millis(1)
    );
    assert_eq!(
        IntervalClock::display_refresh().period(),
        Duration::from_nanos(16_666_667)
    );
}
