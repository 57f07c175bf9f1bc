use std::collections::BTreeMap;

use crate::bridge::transition::Presentation;
use crate::foundation::core::Point;
use crate::replay::snapshot::{MessageChannel, Snapshot, Vital};
use crate::view::progress::AnimatedValues;

/// 128-bit digest of everything a renderer would draw for one frame.
///
/// The query time itself is excluded, so two frames with identical visible state share a
/// fingerprint and the second can reuse the first's pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_frame(
    snapshot: &Snapshot,
    animations: &BTreeMap<String, AnimatedValues>,
    effect_frames: &BTreeMap<String, u64>,
    presentations: &BTreeMap<String, Presentation>,
) -> FrameFingerprint {
    let mut w = FpWriter::new();

    w.opt_str(snapshot.scenario.as_deref());
    w.str(&snapshot.theme);
    w.u64(u64::from(snapshot.onboarding_step));
    for vital in [
        snapshot.vitals.hp,
        snapshot.vitals.shield,
        snapshot.vitals.energy,
    ] {
        w.vital(vital);
    }
    w.u8(u8::from(snapshot.dead));

    w.u64(snapshot.effects.len() as u64);
    for (id, start) in &snapshot.effects {
        w.str(id);
        w.f64(*start);
    }

    w.u64(snapshot.targets.len() as u64);
    for (id, target) in &snapshot.targets {
        w.str(id);
        w.point(target.position);
        w.f64(target.locked_at);
    }

    w.u64(snapshot.markers.len() as u64);
    for m in &snapshot.markers {
        w.str(&m.id);
        w.point(m.position);
        w.opt_str(m.label.as_deref());
        w.f64(m.spawned_at);
    }

    w.point(snapshot.pointer.position);
    w.u8(u8::from(snapshot.pointer.pressed));

    w.u64(snapshot.ui_elements.len() as u64);
    for (id, el) in &snapshot.ui_elements {
        w.str(id);
        w.u8(u8::from(el.visible));
        w.u64(u64::from(el.epoch));
        w.f64(el.enter_time);
        match el.exit_time {
            Some(t) => {
                w.u8(1);
                w.f64(t);
            }
            None => w.u8(0),
        }
    }

    // Animation entries are covered through their evaluated values below.
    w.u64(animations.len() as u64);
    for (id, anim) in animations {
        w.str(id);
        w.f64(anim.progress);
        w.u64(anim.values.len() as u64);
        for (k, v) in &anim.values {
            w.str(k);
            w.f64(*v);
        }
    }

    w.u64(effect_frames.len() as u64);
    for (id, frame) in effect_frames {
        w.str(id);
        w.u64(*frame);
    }

    w.u64(presentations.len() as u64);
    for (id, p) in presentations {
        w.str(id);
        w.f64(p.opacity);
        w.f64(p.offset.x);
        w.f64(p.offset.y);
        w.f64(p.scale);
        w.f64(p.rotation_deg);
    }

    w.u64(snapshot.messages.len() as u64);
    for msg in &snapshot.messages {
        w.u8(match msg.channel {
            MessageChannel::Chat => 0,
            MessageChannel::Alert => 1,
        });
        w.opt_str(msg.author.as_deref());
        w.str(&msg.text);
        w.opt_str(msg.severity.as_deref());
        w.f64(msg.posted_at);
    }

    w.finish()
}

struct FpWriter {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl FpWriter {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new(0xcbf29ce484222325),
            b: Fnv1a64::new(0x9ae16a3b2f90404f),
        }
    }

    fn bytes(&mut self, bytes: &[u8]) {
        self.a.write_bytes(bytes);
        self.b.write_bytes(bytes);
    }

    fn u8(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.bytes(s.as_bytes());
    }

    fn opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.u8(1);
                self.str(s);
            }
            None => self.u8(0),
        }
    }

    fn point(&mut self, p: Point) {
        self.f64(p.x);
        self.f64(p.y);
    }

    fn vital(&mut self, v: Vital) {
        self.f64(v.current);
        self.f64(v.max);
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

#[derive(Clone, Copy)]
struct Fnv1a64(u64);

impl Fnv1a64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        self.0 = h;
    }

    fn finish(self) -> u64 {
        self.0
    }
}
