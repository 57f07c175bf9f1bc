use crate::foundation::core::TimeMs;
use crate::replay::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Fixed timing of a looping sprite/shader effect.
pub struct CycleSpec {
    /// Frames per second of the effect's own animation.
    pub fps: f64,
    /// Frames in one loop.
    pub total_frames: u64,
}

/// Current loop frame of the timed effect `effect` at `query` ms.
///
/// Returns `None` when the effect is not active in the snapshot or the cycle is degenerate.
pub fn cycle_frame_index(
    snapshot: &Snapshot,
    effect: &str,
    query: TimeMs,
    spec: CycleSpec,
) -> Option<u64> {
    let start = *snapshot.effects.get(effect)?;
    if spec.total_frames == 0 || !spec.fps.is_finite() || spec.fps <= 0.0 {
        return None;
    }
    let elapsed_ms = (query - start).max(0.0);
    let frame = (elapsed_ms / 1000.0 * spec.fps).floor() as u64;
    Some(frame % spec.total_frames)
}
