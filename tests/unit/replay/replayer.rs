use super::*;
use crate::foundation::core::Point;
use crate::record::payload::{
    HpChange, OnboardingStep, PointerMove, ScenarioChange, ThemeChange, UiEnter,
};
use crate::record::event::EventKind;
use crate::replay::snapshot::DEFAULT_HP;

fn hp(t: f64, v: f64) -> Event {
    Event::new(
        t,
        HpChange {
            current_hp: Some(v),
            max_hp: None,
        },
    )
}

fn theme(t: f64, name: &str) -> Event {
    Event::new(
        t,
        ThemeChange {
            theme: Some(name.to_owned()),
        },
    )
}

fn sample_events() -> Vec<Event> {
    vec![
        Event::new(
            0.0,
            PointerMove {
                x: Some(0.0),
                y: Some(0.0),
                pressed: Some(false),
            },
        ),
        theme(50.0, "night"),
        Event::new(
            100.0,
            PointerMove {
                x: Some(100.0),
                y: Some(100.0),
                pressed: Some(true),
            },
        ),
        hp(200.0, 640.0),
        Event::new(
            300.0,
            ScenarioChange {
                scenario: Some("boss".to_owned()),
            },
        ),
    ]
}

#[test]
fn same_inputs_yield_equal_snapshots() {
    let r = Replayer::new(sample_events(), None).unwrap();
    for t in [0.0, 49.9, 50.0, 123.4, 300.0] {
        assert_eq!(r.state_at(t), r.state_at(t));
    }
    let other = Replayer::new(sample_events(), None).unwrap();
    assert_eq!(r.state_at(210.0), other.state_at(210.0));
}

#[test]
fn duration_defaults_to_last_event() {
    let r = Replayer::new(sample_events(), None).unwrap();
    assert_eq!(r.duration(), 300.0);
    let r = Replayer::new(Vec::new(), None).unwrap();
    assert_eq!(r.duration(), 0.0);
    assert_eq!(r.state_at(10.0), Snapshot::default());
}

#[test]
fn queries_are_clamped_to_recording_range() {
    let r = Replayer::new(sample_events(), None).unwrap();
    assert_eq!(r.state_at(-5.0), r.state_at(0.0));
    assert_eq!(r.state_at(r.duration() + 1000.0), r.state_at(r.duration()));
    assert_eq!(r.state_at(f64::NAN), r.state_at(0.0));

    let explicit = Replayer::new(sample_events(), Some(1000.0)).unwrap();
    assert_eq!(explicit.state_at(5000.0).time_ms, 1000.0);
}

#[test]
fn later_queries_keep_earlier_discrete_changes() {
    let r = Replayer::new(sample_events(), None).unwrap();
    let early = r.state_at(60.0);
    assert_eq!(early.theme, "night");
    for t in [60.0, 150.0, 250.0, 300.0] {
        assert_eq!(r.state_at(t).theme, "night");
    }
    assert_eq!(r.state_at(199.0).vitals.hp, DEFAULT_HP);
    assert_eq!(r.state_at(200.0).vitals.hp.current, 640.0);
}

#[test]
fn pointer_is_interpolated_and_button_held() {
    let r = Replayer::new(sample_events(), None).unwrap();
    let s = r.state_at(50.0);
    assert_eq!(s.pointer.position, Point::new(50.0, 50.0));
    assert!(!s.pointer.pressed);
    assert!(r.state_at(100.0).pointer.pressed);
    assert_eq!(r.state_at(250.0).pointer.position, Point::new(100.0, 100.0));
}

#[test]
fn input_order_does_not_matter() {
    let unsorted = vec![hp(200.0, 1.0), theme(50.0, "day")];
    let sorted = vec![theme(50.0, "day"), hp(200.0, 1.0)];
    let a = Replayer::new(unsorted, None).unwrap();
    let b = Replayer::new(sorted, None).unwrap();
    for t in [0.0, 50.0, 120.0, 200.0] {
        assert_eq!(a.state_at(t), b.state_at(t));
    }
    assert_eq!(a.events(), b.events());
}

#[test]
fn ties_apply_in_recorded_order() {
    let r = Replayer::new(
        vec![
            Event::new(10.0, OnboardingStep { step: Some(1) }),
            Event::new(10.0, OnboardingStep { step: Some(2) }),
        ],
        None,
    )
    .unwrap();
    assert_eq!(r.state_at(10.0).onboarding_step, 2);
}

#[test]
fn hp_then_panel_scenario() {
    let r = Replayer::new(
        vec![
            hp(500.0, 1200.0),
            Event::new(
                600.0,
                UiEnter {
                    element_id: Some("panel".to_owned()),
                    epoch: None,
                },
            ),
        ],
        None,
    )
    .unwrap();

    let s = r.state_at(400.0);
    assert_eq!(s.vitals.hp, DEFAULT_HP);
    assert!(!s.ui_elements.contains_key("panel"));

    let s = r.state_at(550.0);
    assert_eq!(s.vitals.hp.current, 1200.0);
    assert!(!s.ui_elements.contains_key("panel"));

    let s = r.state_at(700.0);
    assert_eq!(s.vitals.hp.current, 1200.0);
    let panel = s.ui_elements["panel"];
    assert!(panel.visible);
    assert_eq!(panel.enter_time, 600.0);
}

#[test]
fn invalid_construction_inputs_are_rejected() {
    assert!(Replayer::new(Vec::new(), Some(-1.0)).is_err());
    assert!(Replayer::new(Vec::new(), Some(f64::INFINITY)).is_err());
    assert!(Replayer::new(vec![hp(f64::NAN, 1.0)], None).is_err());
    assert!(Replayer::new(vec![hp(-3.0, 1.0)], None).is_err());
}

#[test]
fn interleaved_pointer_events_do_not_shift_the_fold() {
    let r = Replayer::new(
        vec![
            Event::new(
                30.0,
                PointerMove {
                    x: Some(3.0),
                    y: Some(3.0),
                    pressed: None,
                },
            ),
            hp(20.0, 700.0),
            Event::new(
                10.0,
                PointerMove {
                    x: Some(1.0),
                    y: Some(1.0),
                    pressed: None,
                },
            ),
            hp(40.0, 650.0),
        ],
        None,
    )
    .unwrap();

    assert_eq!(r.len(), 4);
    assert_eq!(r.events()[1].kind(), EventKind::HpChange);
    assert_eq!(r.state_at(25.0).vitals.hp.current, 700.0);
    assert_eq!(r.state_at(35.0).vitals.hp.current, 700.0);
    assert_eq!(r.state_at(40.0).vitals.hp.current, 650.0);
    assert_eq!(r.state_at(20.0).pointer.position, Point::new(2.0, 2.0));
}
