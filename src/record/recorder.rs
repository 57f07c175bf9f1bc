use crate::foundation::clock::Clock;
use crate::foundation::core::TimeMs;
use crate::record::event::{Event, EventPayload};

/// Append-only event log for one interactive recording session.
///
/// A recorder is an explicit instance owned by whoever drives the session; nothing here is
/// process-global. Logging never fails: outside an active recording every event is dropped.
#[derive(Debug)]
pub struct Recorder<C: Clock> {
    clock: C,
    events: Vec<Event>,
    baseline: Option<TimeMs>,
}

impl<C: Clock> Recorder<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            events: Vec::new(),
            baseline: None,
        }
    }

    /// Begin a new recording. Prior events are discarded and elapsed time restarts at zero.
    pub fn start(&mut self) {
        self.events.clear();
        let baseline = self.clock.now_ms();
        self.baseline = Some(baseline);
        tracing::debug!(baseline_ms = baseline, "recording started");
    }

    /// Append an event stamped with the current elapsed time. No-op when not recording.
    pub fn log(&mut self, payload: impl Into<EventPayload>) {
        if self.baseline.is_none() {
            return;
        }
        let timestamp = self.current_elapsed();
        self.push(timestamp, payload.into());
    }

    /// Append an event with a producer-supplied elapsed time. No-op when not recording.
    ///
    /// Negative or non-finite times are stamped as `0`.
    pub fn log_at(&mut self, timestamp: TimeMs, payload: impl Into<EventPayload>) {
        if self.baseline.is_none() {
            return;
        }
        let timestamp = if timestamp.is_finite() {
            timestamp.max(0.0)
        } else {
            0.0
        };
        self.push(timestamp, payload.into());
    }

    fn push(&mut self, timestamp: TimeMs, payload: EventPayload) {
        tracing::trace!(timestamp, kind = %payload.kind(), "event logged");
        self.events.push(Event { timestamp, payload });
    }

    /// End the recording and return everything logged since [`Recorder::start`], sorted by
    /// timestamp (stable). Returns an empty sequence when not recording.
    pub fn stop(&mut self) -> Vec<Event> {
        if self.baseline.take().is_none() {
            return Vec::new();
        }
        let mut events = std::mem::take(&mut self.events);
        events.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        tracing::debug!(events = events.len(), "recording stopped");
        events
    }

    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    /// Milliseconds since [`Recorder::start`], or `0` when not recording.
    pub fn current_elapsed(&self) -> TimeMs {
        match self.baseline {
            Some(baseline) => (self.clock.now_ms() - baseline).max(0.0),
            None => 0.0,
        }
    }

    /// Number of events captured so far in the active recording.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/recorder.rs"]
mod tests;
