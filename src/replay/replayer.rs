use crate::foundation::core::TimeMs;
use crate::foundation::error::{HudError, HudResult};
use crate::record::event::Event;
use crate::replay::pointer::PointerTrack;
use crate::replay::snapshot::Snapshot;

/// Pure reconstruction of scene state from a recorded event sequence.
///
/// The replayer keeps no state between queries: every [`Replayer::state_at`] call folds a fresh
/// [`Snapshot`], so the result depends only on the events and the query time.
#[derive(Clone, Debug)]
pub struct Replayer {
    /// All events, sorted by timestamp (stable).
    events: Vec<Event>,
    /// Indices into `events` of the non-pointer events; the fold input.
    discrete: Vec<usize>,
    pointer: PointerTrack,
    duration: TimeMs,
}

impl Replayer {
    /// Build a replayer. Events are stably sorted by timestamp; `duration` defaults to the last
    /// event's timestamp.
    pub fn new(mut events: Vec<Event>, duration: Option<TimeMs>) -> HudResult<Self> {
        if let Some(bad) = events
            .iter()
            .find(|e| !e.timestamp.is_finite() || e.timestamp < 0.0)
        {
            return Err(HudError::validation(format!(
                "event timestamp must be finite and >= 0 (got {} for {})",
                bad.timestamp,
                bad.kind()
            )));
        }
        if let Some(d) = duration
            && (!d.is_finite() || d < 0.0)
        {
            return Err(HudError::validation(format!(
                "replay duration must be finite and >= 0 (got {d})"
            )));
        }

        events.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        let duration = duration.unwrap_or_else(|| events.last().map_or(0.0, |e| e.timestamp));
        let discrete = events
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.kind().is_pointer())
            .map(|(i, _)| i)
            .collect();
        let pointer = PointerTrack::from_sorted(&events);

        tracing::debug!(
            events = events.len(),
            duration_ms = duration,
            "replayer constructed"
        );
        Ok(Self {
            events,
            discrete,
            pointer,
            duration,
        })
    }

    /// Reconstruct the scene at `query` ms. Queries outside `[0, duration]` are clamped.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn state_at(&self, query: TimeMs) -> Snapshot {
        let t = self.clamp(query);

        let mut snapshot = Snapshot {
            time_ms: t,
            ..Snapshot::default()
        };
        let end = self
            .discrete
            .partition_point(|&i| self.events[i].timestamp <= t);
        for &i in &self.discrete[..end] {
            snapshot.apply(&self.events[i]);
        }
        if !self.pointer.is_empty() {
            snapshot.pointer = self.pointer.resolve(t);
        }
        snapshot
    }

    /// Clamp a query time into `[0, duration]`. NaN maps to `0`.
    pub fn clamp(&self, query: TimeMs) -> TimeMs {
        if query.is_nan() {
            return 0.0;
        }
        query.clamp(0.0, self.duration)
    }

    pub fn duration(&self) -> TimeMs {
        self.duration
    }

    /// Sorted events the replayer was built from.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/replay/replayer.rs"]
mod tests;
