use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use rayon::prelude::*;

use crate::bridge::registry::ElementKey;
use crate::bridge::timing::TimingBridge;
use crate::bridge::transition::{Presentation, Transition};
use crate::foundation::core::{Fps, FrameIndex, FrameRange, TimeMs};
use crate::foundation::error::{HudError, HudResult};
use crate::record::event::EventPayload;
use crate::replay::replayer::Replayer;
use crate::replay::snapshot::Snapshot;
use crate::session::fingerprint::{FrameFingerprint, fingerprint_frame};
use crate::session::recording::SessionRecording;
use crate::view::cycle::{CycleSpec, cycle_frame_index};
use crate::view::progress::{AnimatedValues, all_animation_progress};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Options for an offline replay pass.
///
/// Every field is optional in JSON; omitted fields keep their defaults (30 fps, sequential).
pub struct ReplayOpts {
    pub fps: Fps,
    pub parallel: bool,
    /// Worker count for the dedicated pool. `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Loop timing of effects that drive sprite cycles, keyed by effect id.
    pub cycles: BTreeMap<String, CycleSpec>,
    /// Enter transition declared per UI element id.
    pub transitions: BTreeMap<String, Transition>,
}

impl ReplayOpts {
    pub fn from_reader<R: std::io::Read>(r: R) -> HudResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HudError::serde(format!("parse replay options JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let f =
            File::open(path).with_context(|| format!("open replay options '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    fn validate(&self) -> HudResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(HudError::validation(
                "replay option 'threads' must be >= 1 when set",
            ));
        }
        for (id, spec) in &self.cycles {
            if !spec.fps.is_finite() || spec.fps <= 0.0 || spec.total_frames == 0 {
                return Err(HudError::validation(format!(
                    "cycle '{id}' needs fps > 0 and totalFrames >= 1"
                )));
            }
        }
        for (id, tr) in &self.transitions {
            if !tr.duration_ms.is_finite() || tr.duration_ms < 0.0 {
                return Err(HudError::validation(format!(
                    "transition '{id}' durationMs must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Everything an external renderer needs to draw one frame.
pub struct FramePayload {
    pub frame: FrameIndex,
    /// Virtual time of the frame, clamped to the recording.
    pub time_ms: TimeMs,
    pub snapshot: Snapshot,
    pub animations: BTreeMap<String, AnimatedValues>,
    /// Loop frame of every active effect that has a cycle configured.
    pub effect_frames: BTreeMap<String, u64>,
    /// Transition state of every visible element that has a transition declared.
    pub presentations: BTreeMap<String, Presentation>,
    pub fingerprint: FrameFingerprint,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayStats {
    pub frames_total: u64,
    /// Frames whose fingerprint equals the previous frame's; a renderer may reuse its output.
    pub frames_static: u64,
}

impl ReplayStats {
    fn from_payloads(payloads: &[FramePayload]) -> Self {
        let frames_static = payloads
            .windows(2)
            .filter(|w| w[0].fingerprint == w[1].fingerprint)
            .count() as u64;
        Self {
            frames_total: payloads.len() as u64,
            frames_static,
        }
    }
}

/// Frame-indexed view of a recorded session, driven by virtual time.
///
/// Holds a [`Replayer`] and a pull-mode [`TimingBridge`] over the recording's timing registry.
/// Frames are independent of each other, so any range can be evaluated in any order.
#[derive(Clone, Debug)]
pub struct ReplaySession {
    replayer: Replayer,
    bridge: TimingBridge,
    opts: ReplayOpts,
}

impl ReplaySession {
    pub fn new(recording: &SessionRecording, opts: ReplayOpts) -> HudResult<Self> {
        opts.validate()?;
        let replayer = recording.replayer()?;
        if opts
            .fps
            .checked_frames_covering(replayer.duration())
            .is_none()
        {
            return Err(HudError::validation(format!(
                "recording duration {}ms is too long to index at {} fps",
                replayer.duration(),
                opts.fps.as_f64()
            )));
        }
        let bridge = TimingBridge::pull(recording.timings.clone());
        let session = Self {
            replayer,
            bridge,
            opts,
        };
        for key in session.unregistered_keys() {
            tracing::warn!(%key, "no recorded transition start; element enter time is used");
        }
        tracing::debug!(
            fps = session.opts.fps.as_f64(),
            parallel = session.opts.parallel,
            timings = session.bridge.registry().len(),
            "replay session ready"
        );
        Ok(session)
    }

    /// Mounted elements with a declared transition but no recorded start time.
    fn unregistered_keys(&self) -> BTreeSet<ElementKey> {
        self.replayer
            .events()
            .iter()
            .filter_map(|e| match &e.payload {
                EventPayload::UiEnter(p) => {
                    let id = p.element_id.as_ref()?;
                    Some(ElementKey::with_epoch(id.as_str(), p.epoch.unwrap_or(0)))
                }
                _ => None,
            })
            .filter(|key| {
                self.opts.transitions.contains_key(&key.id)
                    && !self.bridge.registry().contains(key)
            })
            .collect()
    }

    pub fn opts(&self) -> &ReplayOpts {
        &self.opts
    }

    pub fn replayer(&self) -> &Replayer {
        &self.replayer
    }

    pub fn frame_time(&self, frame: FrameIndex) -> TimeMs {
        self.opts.fps.frame_to_ms(frame)
    }

    /// Frames whose start time lies within `[0, duration]`. Always at least one.
    pub fn frame_count(&self) -> u64 {
        self.opts.fps.frames_covering(self.replayer.duration())
    }

    pub fn full_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.frame_count()),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn frame(&self, frame: FrameIndex) -> FramePayload {
        let t = self.replayer.clamp(self.frame_time(frame));
        let snapshot = self.replayer.state_at(t);
        let animations = all_animation_progress(&snapshot, t);

        let effect_frames = self
            .opts
            .cycles
            .iter()
            .filter_map(|(id, spec)| {
                cycle_frame_index(&snapshot, id, t, *spec).map(|idx| (id.clone(), idx))
            })
            .collect::<BTreeMap<_, _>>();

        let presentations = snapshot
            .ui_elements
            .iter()
            .filter(|(_, el)| el.visible)
            .filter_map(|(id, el)| {
                let transition = self.opts.transitions.get(id)?;
                let key = ElementKey::with_epoch(id.as_str(), el.epoch);
                Some((id.clone(), self.presentation(&key, transition, t, el.enter_time)))
            })
            .collect::<BTreeMap<_, _>>();

        let fingerprint = fingerprint_frame(&snapshot, &animations, &effect_frames, &presentations);
        FramePayload {
            frame,
            time_ms: t,
            snapshot,
            animations,
            effect_frames,
            presentations,
            fingerprint,
        }
    }

    /// Evaluate `range` (exclusive end) in frame order, optionally on a dedicated rayon pool.
    ///
    /// Parallel evaluation yields exactly the sequential payloads.
    pub fn frames(&self, range: FrameRange) -> HudResult<(Vec<FramePayload>, ReplayStats)> {
        if range.is_empty() {
            return Ok((Vec::new(), ReplayStats::default()));
        }

        let payloads: Vec<FramePayload> = if self.opts.parallel {
            let pool = build_thread_pool(self.opts.threads)?;
            pool.install(|| {
                (range.start.0..range.end.0)
                    .into_par_iter()
                    .map(|f| self.frame(FrameIndex(f)))
                    .collect()
            })
        } else {
            (range.start.0..range.end.0)
                .map(|f| self.frame(FrameIndex(f)))
                .collect()
        };

        let stats = ReplayStats::from_payloads(&payloads);
        tracing::debug!(
            frames = stats.frames_total,
            static_frames = stats.frames_static,
            "replayed frame range"
        );
        Ok((payloads, stats))
    }

    /// Presentation of `key` at `time`, reading its start from the recorded registry.
    pub fn presentation(
        &self,
        key: &ElementKey,
        transition: &Transition,
        time: TimeMs,
        fallback_start: TimeMs,
    ) -> Presentation {
        self.bridge.sample(key, transition, time, fallback_start)
    }
}

fn build_thread_pool(threads: Option<usize>) -> HudResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HudError::validation(
            "replay option 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HudError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render.rs"]
mod tests;
