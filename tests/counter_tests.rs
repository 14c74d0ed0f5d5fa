// Host-side tests for the count-up stats.

use app_core::counter::*;

#[test]
fn eases_out_toward_target() {
    let anim = CounterAnimation::new(500);
    assert_eq!(anim.sample(0.0), CounterFrame { value: 0, finished: false });
    // 1 - 0.5^4 = 0.9375 → floor(468.75)
    assert_eq!(anim.sample(1000.0).value, 468);
    assert!(!anim.sample(1999.0).finished);
}

#[test]
fn lands_exactly_on_target() {
    let anim = CounterAnimation::new(500);
    assert_eq!(anim.sample(2000.0), CounterFrame { value: 500, finished: true });
    assert_eq!(anim.sample(10_000.0).value, 500);

    let big = CounterAnimation::new(u32::MAX as u64 + 7);
    assert_eq!(big.sample(2000.0).value, u32::MAX as u64 + 7);
}

#[test]
fn values_never_decrease() {
    let anim = CounterAnimation::new(1234);
    let mut last = 0;
    for ms in (0..=2100).step_by(16) {
        let v = anim.sample(ms as f64).value;
        assert!(v >= last);
        assert!(v <= 1234);
        last = v;
    }
    assert_eq!(last, 1234);
}

#[test]
fn ease_out_quart_endpoints() {
    assert_eq!(ease_out_quart(0.0), 0.0);
    assert_eq!(ease_out_quart(1.0), 1.0);
    assert!(ease_out_quart(0.25) > 0.25);
}

#[test]
fn parse_target_reads_leading_integer() {
    assert_eq!(parse_target("500"), Some(500));
    assert_eq!(parse_target("  42"), Some(42));
    assert_eq!(parse_target("150+"), Some(150));
    assert_eq!(parse_target("+7"), Some(7));
    assert_eq!(parse_target("12.9"), Some(12));
}

#[test]
fn parse_target_rejects_non_positive_and_garbage() {
    for raw in ["", "   ", "abc", "0", "-5", "- 5", "+", "x12"] {
        assert_eq!(parse_target(raw), None, "{raw:?}");
    }
}

#[test]
fn trigger_fires_once() {
    let mut state = CounterState::from_attr(Some("98"));
    let anim = state.trigger().unwrap();
    assert_eq!(anim.target, 98);
    assert!(state.triggered);
    assert_eq!(state.trigger(), None);
    assert_eq!(state.trigger(), None);
}

#[test]
fn invalid_target_never_triggers() {
    for attr in [None, Some(""), Some("zero"), Some("0")] {
        let mut state = CounterState::from_attr(attr);
        assert_eq!(state.trigger(), None);
        assert!(!state.triggered);
    }
}

#[test]
fn initial_check_is_more_lenient_than_scroll_check() {
    let vh = 800.0;
    // 900px below the fold
    let (top, bottom) = (vh + 900.0, vh + 960.0);
    assert!(near_viewport(top, bottom, vh, INITIAL_MARGIN));
    assert!(!near_viewport(top, bottom, vh, SCROLL_MARGIN));

    // scrolled 300px past it
    let (top, bottom) = (-400.0, -300.0);
    assert!(near_viewport(top, bottom, vh, INITIAL_MARGIN));
    assert!(!near_viewport(top, bottom, vh, SCROLL_MARGIN));

    assert!(near_viewport(10.0, 60.0, vh, SCROLL_MARGIN));
    assert!(!near_viewport(vh + 1000.0, vh + 1100.0, vh, INITIAL_MARGIN));
}
