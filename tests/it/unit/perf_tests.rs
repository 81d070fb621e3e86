//! Unit tests for perf module.

use tabular_view::constants::FRAME_BUDGET_MS;
use tabular_view::perf::ScopedTimer;

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping must not warn or panic
    let _timer = ScopedTimer::new("test_op", 1000.0);
}

#[test]
fn test_default_threshold_timer() {
    let timer = ScopedTimer::with_default_threshold("compose");
    assert_eq!(timer.name(), "compose");
    assert!(timer.elapsed_ms() >= 0.0);
    assert!(FRAME_BUDGET_MS > 16.0);
}

#[test]
fn test_elapsed_is_monotonic() {
    let timer = ScopedTimer::new("work", 1000.0);
    let first = timer.elapsed_ms();
    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(timer.elapsed_ms() >= first);
}
