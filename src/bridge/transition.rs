use crate::animation::ease::{Ease, raw_progress};
use crate::animation::lerp::Lerp;
use crate::foundation::core::{TimeMs, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Presentation fields of an animated HUD element.
pub struct Presentation {
    pub opacity: f64,
    pub offset: Vec2,
    pub scale: f64,
    pub rotation_deg: f64,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            offset: Vec2::ZERO,
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl Lerp for Presentation {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            offset: <Vec2 as Lerp>::lerp(&a.offset, &b.offset, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            rotation_deg: f64::lerp(&a.rotation_deg, &b.rotation_deg, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Single declaration of an element's enter transition, shared by both scheduling modes.
pub struct Transition {
    pub from: Presentation,
    pub to: Presentation,
    pub duration_ms: TimeMs,
    #[serde(default)]
    pub ease: Ease,
}

impl Transition {
    pub fn new(from: Presentation, to: Presentation, duration_ms: TimeMs) -> Self {
        Self {
            from,
            to,
            duration_ms,
            ease: Ease::default(),
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Presentation at `now` for a transition that began at `start`.
    ///
    /// Before `start` this is exactly `from`; at or after `start + duration` exactly `to`.
    pub fn sample(&self, start: TimeMs, now: TimeMs) -> Presentation {
        if now < start {
            return self.from;
        }
        let raw = raw_progress(start, self.duration_ms, now);
        if raw >= 1.0 {
            return self.to;
        }
        Presentation::lerp(&self.from, &self.to, self.ease.apply(raw))
    }
}
