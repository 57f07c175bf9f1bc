use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context as _;

use crate::bridge::registry::TimingRegistry;
use crate::foundation::core::TimeMs;
use crate::foundation::error::{HudError, HudResult};
use crate::record::event::Event;
use crate::replay::replayer::Replayer;

/// Everything an interactive session hands to the offline renderer: the event log plus the
/// transition start times captured by the timing bridge.
///
/// Wire shape: `{ "events": [{timestamp, type, payload}], "timings": {key: ms}, "durationMs" }`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecording {
    pub events: Vec<Event>,
    #[serde(default)]
    pub timings: TimingRegistry,
    /// Explicit total duration; defaults to the last event's timestamp when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<TimeMs>,
}

impl SessionRecording {
    pub fn new(events: Vec<Event>, timings: TimingRegistry) -> Self {
        Self {
            events,
            timings,
            duration_ms: None,
        }
    }

    pub fn with_duration(mut self, duration_ms: TimeMs) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Build a [`Replayer`] over this recording's events.
    pub fn replayer(&self) -> HudResult<Replayer> {
        Replayer::new(self.events.clone(), self.duration_ms)
    }

    /// Parse a recording from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HudResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HudError::serde(format!("parse session recording JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> HudResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| HudError::serde(format!("parse session recording JSON: {e}")))
    }

    /// Parse a recording from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HudResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open session recording '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_writer<W: std::io::Write>(&self, w: W) -> HudResult<()> {
        serde_json::to_writer(w, self)
            .map_err(|e| HudError::serde(format!("write session recording JSON: {e}")))
    }

    pub fn to_json_string(&self) -> HudResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HudError::serde(format!("write session recording JSON: {e}")))
    }

    pub fn to_path(&self, path: impl AsRef<Path>) -> HudResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create session recording '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer(&mut w)?;
        std::io::Write::flush(&mut w)
            .with_context(|| format!("flush session recording '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/recording.rs"]
mod tests;
