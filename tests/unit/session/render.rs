use super::*;
use crate::bridge::registry::TimingRegistry;
use crate::foundation::core::Vec2;
use crate::record::event::Event;
use crate::record::payload::{EffectStart, HpChange, UiEnter};

fn fade_in() -> Transition {
    Transition::new(
        Presentation {
            opacity: 0.0,
            offset: Vec2::new(0.0, 24.0),
            ..Presentation::default()
        },
        Presentation::default(),
        300.0,
    )
}

fn enter(t: f64, id: &str, epoch: Option<u32>) -> Event {
    Event::new(
        t,
        UiEnter {
            element_id: Some(id.to_owned()),
            epoch,
        },
    )
}

fn recording() -> SessionRecording {
    let mut timings = TimingRegistry::new();
    timings.register(ElementKey::new("panel"), 600.0);
    SessionRecording::new(
        vec![
            Event::new(
                200.0,
                EffectStart {
                    effect: Some("overdrive".to_owned()),
                    effects: None,
                },
            ),
            Event::new(
                500.0,
                HpChange {
                    current_hp: Some(1200.0),
                    max_hp: None,
                },
            ),
            enter(600.0, "panel", None),
            enter(800.0, "toast", None),
        ],
        timings,
    )
    .with_duration(1000.0)
}

fn opts() -> ReplayOpts {
    ReplayOpts {
        fps: Fps { num: 10, den: 1 },
        cycles: BTreeMap::from([(
            "overdrive".to_owned(),
            CycleSpec {
                fps: 10.0,
                total_frames: 4,
            },
        )]),
        transitions: BTreeMap::from([
            ("panel".to_owned(), fade_in()),
            ("toast".to_owned(), fade_in()),
        ]),
        ..ReplayOpts::default()
    }
}

#[test]
fn frame_count_covers_duration() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    assert_eq!(session.frame_count(), 11);
    assert_eq!(session.full_range(), FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(11),
    });
    assert_eq!(session.frame_time(FrameIndex(5)), 500.0);
}

#[test]
fn frame_payload_carries_derived_views() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    let p = session.frame(FrameIndex(7));

    assert_eq!(p.frame, FrameIndex(7));
    assert_eq!(p.time_ms, 700.0);
    assert_eq!(p.snapshot.vitals.hp.current, 1200.0);
    // 500ms into a 10fps, 4-frame loop.
    assert_eq!(p.effect_frames.get("overdrive"), Some(&1));
    assert_eq!(p.presentations.get("panel"), Some(&fade_in().sample(600.0, 700.0)));
    assert!(!p.presentations.contains_key("toast"));
}

#[test]
fn unregistered_element_starts_at_enter_time() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    let p = session.frame(FrameIndex(9));
    assert_eq!(p.presentations.get("toast"), Some(&fade_in().sample(800.0, 900.0)));
}

#[test]
fn remounted_element_uses_its_own_epoch() {
    let mut rec = recording();
    rec.events.push(enter(900.0, "panel", Some(1)));
    rec.timings.register(ElementKey::with_epoch("panel", 1), 900.0);
    let session = ReplaySession::new(&rec, opts()).unwrap();

    let p = session.frame(FrameIndex(10));
    assert_eq!(p.snapshot.ui_elements["panel"].epoch, 1);
    assert_eq!(p.presentations.get("panel"), Some(&fade_in().sample(900.0, 1000.0)));
}

#[test]
fn frames_past_the_end_are_clamped() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    let p = session.frame(FrameIndex(50));
    assert_eq!(p.time_ms, 1000.0);
    assert_eq!(p.fingerprint, session.frame(FrameIndex(10)).fingerprint);
}

#[test]
fn stats_count_static_frames() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap();
    let (frames, stats) = session.frames(range).unwrap();
    assert_eq!(frames.len(), 3);
    // 0ms and 100ms show the same scene; the effect starts at 200ms.
    assert_eq!(stats, ReplayStats {
        frames_total: 3,
        frames_static: 1,
    });
}

#[test]
fn parallel_frames_match_sequential() {
    let seq = ReplaySession::new(&recording(), opts()).unwrap();
    let par = ReplaySession::new(&recording(), ReplayOpts {
        parallel: true,
        threads: Some(2),
        ..opts()
    })
    .unwrap();

    let (a, sa) = seq.frames(seq.full_range()).unwrap();
    let (b, sb) = par.frames(par.full_range()).unwrap();
    assert_eq!(a, b);
    assert_eq!(sa, sb);
}

#[test]
fn empty_range_yields_no_frames() {
    let session = ReplaySession::new(&recording(), opts()).unwrap();
    let range = FrameRange::new(FrameIndex(4), FrameIndex(4)).unwrap();
    let (frames, stats) = session.frames(range).unwrap();
    assert!(frames.is_empty());
    assert_eq!(stats, ReplayStats::default());
}

#[test]
fn unregistered_transitions_are_collected_once() {
    let mut rec = recording();
    rec.events.push(enter(900.0, "toast", None));
    rec.events.push(enter(950.0, "banner", None));
    let session = ReplaySession::new(&rec, opts()).unwrap();
    assert_eq!(
        session.unregistered_keys(),
        BTreeSet::from([ElementKey::new("toast")])
    );
}

#[test]
fn overlong_recording_is_rejected() {
    let rec = recording().with_duration(1e300);
    assert!(matches!(
        ReplaySession::new(&rec, opts()),
        Err(HudError::Validation(_))
    ));
}

#[test]
fn invalid_opts_are_rejected() {
    let rec = recording();
    let zero_threads = ReplayOpts {
        threads: Some(0),
        ..opts()
    };
    assert!(matches!(
        ReplaySession::new(&rec, zero_threads),
        Err(HudError::Validation(_))
    ));

    let zero_den = ReplayOpts {
        fps: Fps { num: 30, den: 0 },
        ..opts()
    };
    assert!(ReplaySession::new(&rec, zero_den).is_err());

    let mut bad_cycle = opts();
    bad_cycle.cycles.insert(
        "flicker".to_owned(),
        CycleSpec {
            fps: 12.0,
            total_frames: 0,
        },
    );
    assert!(ReplaySession::new(&rec, bad_cycle).is_err());
}

#[test]
fn opts_fill_omitted_fields_with_defaults() {
    let json = r#"{ "fps": { "num": 60, "den": 1 }, "cycles": { "overdrive": { "fps": 12, "totalFrames": 8 } } }"#;
    let o = ReplayOpts::from_reader(json.as_bytes()).unwrap();
    assert_eq!(o.fps, Fps { num: 60, den: 1 });
    assert!(!o.parallel);
    assert_eq!(o.threads, None);
    assert_eq!(o.cycles["overdrive"].total_frames, 8);
    assert!(o.transitions.is_empty());

    assert!(matches!(
        ReplayOpts::from_reader("{ \"fps\": 30 }".as_bytes()),
        Err(HudError::Serde(_))
    ));
}
