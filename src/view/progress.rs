use std::collections::BTreeMap;

use crate::animation::ease::{Ease, raw_progress};
use crate::animation::lerp::Lerp;
use crate::foundation::core::TimeMs;
use crate::replay::snapshot::{AnimationEntry, Snapshot};

/// Easing applied to every named-property animation.
pub const ANIMATION_EASE: Ease = Ease::OutCubic;

/// Properties whose implicit start value is `1` rather than `0`.
const UNIT_DEFAULT_KEYS: [&str; 4] = ["opacity", "scale", "scaleX", "scaleY"];

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Instantaneous values of one in-flight animation.
pub struct AnimatedValues {
    /// Eased progress in `[0, 1]`.
    pub progress: f64,
    /// Interpolated value for every key of the animation's `to` map.
    pub values: BTreeMap<String, f64>,
}

/// Start value assumed for `key` when the animation's `from` map omits it.
pub fn default_from_value(key: &str) -> f64 {
    if UNIT_DEFAULT_KEYS.contains(&key) {
        1.0
    } else {
        0.0
    }
}

/// Evaluate the animation stored under `key` at `query` ms, or `None` if it is not in the
/// snapshot.
pub fn animation_progress(snapshot: &Snapshot, key: &str, query: TimeMs) -> Option<AnimatedValues> {
    snapshot
        .animations
        .get(key)
        .map(|entry| sample_entry(entry, query))
}

/// Evaluate every animation in the snapshot at `query` ms.
pub fn all_animation_progress(
    snapshot: &Snapshot,
    query: TimeMs,
) -> BTreeMap<String, AnimatedValues> {
    snapshot
        .animations
        .iter()
        .map(|(key, entry)| (key.clone(), sample_entry(entry, query)))
        .collect()
}

fn sample_entry(entry: &AnimationEntry, query: TimeMs) -> AnimatedValues {
    let raw = if entry.ended_at.is_some_and(|end| query >= end) {
        1.0
    } else {
        raw_progress(entry.start_time, entry.duration, query)
    };
    let progress = ANIMATION_EASE.apply(raw);

    let values = entry
        .to
        .iter()
        .map(|(k, to)| {
            let from = entry
                .from
                .get(k)
                .copied()
                .unwrap_or_else(|| default_from_value(k));
            (k.clone(), f64::lerp(&from, to, progress))
        })
        .collect();

    AnimatedValues { progress, values }
}

#[cfg(test)]
#[path = "../../tests/unit/view/progress.rs"]
mod tests;
