use super::*;
use crate::foundation::clock::VirtualClock;
use crate::record::event::EventKind;
use crate::record::payload::{HpChange, UiEnter};

fn hp(v: f64) -> HpChange {
    HpChange {
        current_hp: Some(v),
        max_hp: None,
    }
}

#[test]
fn log_before_start_is_dropped() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.log(hp(10.0));
    assert_eq!(rec.len(), 0);
    assert!(!rec.is_active());
    assert_eq!(rec.current_elapsed(), 0.0);
}

#[test]
fn timestamps_are_relative_to_start() {
    let clock = VirtualClock::new();
    clock.set(10_000.0);
    let mut rec = Recorder::new(&clock);
    rec.start();
    clock.advance(500.0);
    rec.log(hp(1200.0));
    clock.advance(100.0);
    rec.log(UiEnter {
        element_id: Some("panel".to_owned()),
        epoch: None,
    });
    assert_eq!(rec.current_elapsed(), 600.0);

    let events = rec.stop();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].timestamp, 500.0);
    assert_eq!(events[0].kind(), EventKind::HpChange);
    assert_eq!(events[1].timestamp, 600.0);
    assert_eq!(events[1].kind(), EventKind::UiEnter);
}

#[test]
fn double_stop_returns_empty() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.start();
    rec.log(hp(1.0));
    assert_eq!(rec.stop().len(), 1);
    assert!(rec.stop().is_empty());
    assert!(!rec.is_active());
}

#[test]
fn stop_without_start_returns_empty() {
    let mut rec = Recorder::new(VirtualClock::new());
    assert!(rec.stop().is_empty());
}

#[test]
fn restart_discards_previous_events() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.start();
    rec.log(hp(1.0));
    clock.advance(2_000.0);
    rec.start();
    assert!(rec.is_empty());
    clock.advance(5.0);
    rec.log(hp(2.0));
    let events = rec.stop();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].timestamp, 5.0);
}

#[test]
fn log_at_sorts_on_stop_and_clamps_negative_times() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.start();
    rec.log_at(300.0, hp(3.0));
    rec.log_at(-20.0, hp(0.0));
    rec.log_at(100.0, hp(1.0));
    rec.log_at(100.0, hp(2.0));

    let events = rec.stop();
    let times: Vec<_> = events.iter().map(|e| e.timestamp).collect();
    assert_eq!(times, vec![0.0, 100.0, 100.0, 300.0]);
    // Ties keep recorded order.
    assert_eq!(events[1], Event::new(100.0, hp(1.0)));
    assert_eq!(events[2], Event::new(100.0, hp(2.0)));
}
