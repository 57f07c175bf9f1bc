use crate::foundation::error::{HudError, HudResult};

pub use kurbo::{Point, Vec2};

/// Milliseconds relative to the start of a recording session.
pub type TimeMs = f64;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> HudResult<Self> {
        if start.0 > end.0 {
            return Err(HudError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl Fps {
    pub fn new(num: u32, den: u32) -> HudResult<Self> {
        if den == 0 {
            return Err(HudError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HudError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Virtual time of the start of `frame`, in milliseconds.
    pub fn frame_to_ms(self, frame: FrameIndex) -> TimeMs {
        (frame.0 as f64) * 1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Number of frames whose start time falls within `[0, duration_ms]`, saturating at
    /// `u64::MAX`.
    pub fn frames_covering(self, duration_ms: TimeMs) -> u64 {
        self.checked_frames_covering(duration_ms).unwrap_or(u64::MAX)
    }

    /// [`Fps::frames_covering`], or `None` when the count does not fit in a `u64`.
    pub fn checked_frames_covering(self, duration_ms: TimeMs) -> Option<u64> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Some(1);
        }
        let last = (duration_ms / 1000.0 * self.as_f64()).floor();
        if last >= u64::MAX as f64 {
            return None;
        }
        (last as u64).checked_add(1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
