use super::*;

#[test]
fn guard_runs_while_scope_is_alive() {
    let scope = TimerScope::new();
    let guard = scope.guard();
    assert_eq!(guard.run(|| 7), Some(7));
}

#[test]
fn cancelled_scope_suppresses_pending_callbacks() {
    let scope = TimerScope::new();
    let early = scope.guard();
    scope.cancel();
    let late = scope.guard();

    let mut fired = 0;
    assert_eq!(early.run(|| fired += 1), None);
    assert_eq!(late.run(|| fired += 1), None);
    assert_eq!(fired, 0);
    assert!(!scope.is_alive());
}

#[test]
fn cancel_is_visible_through_clones() {
    let scope = TimerScope::new();
    let clone = scope.clone();
    clone.cancel();
    assert!(!scope.is_alive());
    scope.cancel();
    assert!(!clone.guard().is_alive());
}

#[test]
fn duration_from_ms_handles_fractional_and_invalid() {
    assert_eq!(duration_from_ms(140.0), std::time::Duration::from_millis(140));
    assert_eq!(duration_from_ms(-5.0), std::time::Duration::ZERO);
    assert_eq!(duration_from_ms(f64::NAN), std::time::Duration::ZERO);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn clocks_are_stable_off_browser() {
    assert_eq!(now_ms(), 0.0);
    assert!(epoch_ms() > 0);
}
