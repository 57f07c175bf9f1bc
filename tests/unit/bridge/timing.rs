use super::*;
use crate::foundation::clock::VirtualClock;
use crate::foundation::core::Vec2;
use crate::record::event::EventKind;

fn slide_in() -> Transition {
    Transition::new(
        Presentation {
            opacity: 0.0,
            offset: Vec2::new(-40.0, 0.0),
            scale: 0.5,
            rotation_deg: -10.0,
        },
        Presentation {
            opacity: 1.0,
            offset: Vec2::new(0.0, 0.0),
            scale: 1.0,
            rotation_deg: 0.0,
        },
        300.0,
    )
}

#[test]
fn pull_mode_reproduces_continuous_timing() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.start();
    clock.set(1000.0);

    let key = ElementKey::new("hp-panel");
    let mut live = TimingBridge::continuous();
    assert_eq!(live.mount_with(&key, &rec), 1000.0);

    let render = TimingBridge::pull(live.into_registry());
    let tr = slide_in();

    let eased = 1.0 - (1.0 - 0.5_f64).powi(3);
    let mid = render.sample(&key, &tr, 1150.0, 0.0);
    assert_eq!(mid.opacity, 0.0 + (1.0 - 0.0) * eased);
    assert_eq!(mid.offset.x, -40.0 + (0.0 - -40.0) * eased);
    assert_eq!(mid.scale, 0.5 + (1.0 - 0.5) * eased);
    assert_eq!(mid.rotation_deg, -10.0 + (0.0 - -10.0) * eased);

    assert_eq!(render.sample(&key, &tr, 900.0, 0.0), tr.from);
    assert_eq!(render.sample(&key, &tr, 2000.0, 0.0), tr.to);
}

#[test]
fn rerender_keeps_first_start() {
    let mut live = TimingBridge::continuous();
    let key = ElementKey::new("toast");
    assert_eq!(live.mount(&key, 100.0), 100.0);
    assert_eq!(live.mount(&key, 450.0), 100.0);
    assert_eq!(live.mount(&key.remount(), 450.0), 450.0);
    assert_eq!(live.registry().len(), 2);
}

#[test]
fn pull_mode_never_registers() {
    let mut render = TimingBridge::pull(TimingRegistry::new());
    let key = ElementKey::new("late");
    assert_eq!(render.mode(), BridgeMode::Pull);
    assert_eq!(render.mount(&key, 700.0), 700.0);
    assert!(render.registry().is_empty());
}

#[test]
fn missing_registration_falls_back_to_supplied_start() {
    let render = TimingBridge::pull(TimingRegistry::new());
    let tr = slide_in();
    let key = ElementKey::new("unknown");
    assert_eq!(render.sample(&key, &tr, 500.0, 500.0), tr.from);
    assert_eq!(render.sample(&key, &tr, 800.0, 500.0), tr.to);
}

#[test]
fn unmount_logs_implicit_exit() {
    let clock = VirtualClock::new();
    let mut rec = Recorder::new(&clock);
    rec.start();
    let key = ElementKey::new("panel");
    let mut live = TimingBridge::continuous();
    live.mount_with(&key, &rec);
    clock.advance(250.0);
    live.unmount(&key, &mut rec);

    let events = rec.stop();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind(), EventKind::UiExit);
    assert_eq!(events[0].timestamp, 250.0);
}
